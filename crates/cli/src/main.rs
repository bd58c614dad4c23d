//! Waitline CLI - Command-line client for the Waitline queue service

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tokio::time::{interval, MissedTickBehavior};
use waitline_core::domain::{QueueStatus, QueueStatusView};
use waitline_core::port::random_source::ThreadRandomSource;
use waitline_sdk::{ClientReconciler, SyncMode, TicketWallet, WaitlineClient, POLL_INTERVAL};

const DEFAULT_URL: &str = "http://127.0.0.1:4000";

#[derive(Parser)]
#[command(name = "waitline")]
#[command(about = "Waitline virtual queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Service base URL
    #[arg(long, env = "WAITLINE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the queue of one establishment
    Status {
        /// Establishment id
        restaurant_id: String,

        /// Participant to show the position of
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Join a queue
    Join {
        /// Establishment id
        restaurant_id: String,

        /// Participant id
        #[arg(short, long)]
        user: String,

        /// Number of people (1-8)
        #[arg(short, long)]
        party_size: Option<i64>,

        /// Ticket file (JSON array); joining requires an unused ticket for this establishment
        #[arg(long)]
        tickets: Option<PathBuf>,
    },

    /// Leave a queue
    Leave {
        /// Establishment id
        restaurant_id: String,

        /// Participant id
        #[arg(short, long)]
        user: String,
    },

    /// Show per-establishment statistics
    Stats,

    /// Poll a queue continuously, simulating it while the service is unreachable
    Watch {
        /// Establishment id
        restaurant_id: String,

        /// Participant id
        #[arg(short, long)]
        user: String,

        /// Join before watching
        #[arg(long)]
        join: bool,

        /// Party size used with --join
        #[arg(short, long)]
        party_size: Option<i64>,

        /// Simulate an emergency stop: offline queues only shrink
        #[arg(long)]
        emergency_stop: bool,

        /// Stop after this many polls (default: until Ctrl+C)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Establishment")]
    restaurant_id: String,
    #[tabled(rename = "Waiting")]
    total_queue_size: u32,
    #[tabled(rename = "Now serving")]
    current_number: u64,
    #[tabled(rename = "Next ticket")]
    next_ticket_number: u64,
    #[tabled(rename = "Status")]
    current_status: QueueStatus,
}

fn status_label(status: QueueStatus) -> ColoredString {
    match status {
        QueueStatus::Green => "GREEN".green().bold(),
        QueueStatus::Yellow => "YELLOW".yellow().bold(),
        QueueStatus::Red => "RED".red().bold(),
    }
}

fn print_view(view: &QueueStatusView) {
    println!("{}", format!("Queue: {}", view.restaurant_id).cyan().bold());
    println!();
    match view.my_queue_number {
        Some(n) => {
            println!("  {} #{}", "My ticket:".bold(), n);
            println!("  {} {}", "People ahead:".bold(), view.people_ahead);
        }
        None => println!("  {} not in queue", "My ticket:".bold()),
    }
    println!("  {} {}", "Waiting:".bold(), view.total_queue_size);
    println!(
        "  {} ~{} min",
        "Estimated wait:".bold(),
        view.estimated_wait_time_minutes
    );
    println!("  {} {}", "Status:".bold(), status_label(view.current_status));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = WaitlineClient::new(&cli.url).context("Invalid service URL")?;

    match cli.command {
        Commands::Status {
            restaurant_id,
            user,
        } => {
            let view = client
                .status(&restaurant_id, user.as_deref())
                .await
                .context("Failed to fetch queue status")?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }

        Commands::Join {
            restaurant_id,
            user,
            party_size,
            tickets,
        } => {
            if let Some(path) = tickets {
                let wallet = TicketWallet::load(&path)
                    .with_context(|| format!("Failed to load tickets from {}", path.display()))?;

                if !wallet.can_join(&restaurant_id) {
                    bail!("No unused ticket for {}", restaurant_id);
                }

                let size = u32::try_from(party_size.unwrap_or(1).max(1)).unwrap_or(u32::MAX);
                if !wallet.covers_party(&restaurant_id, size) {
                    println!(
                        "{}",
                        format!(
                            "! Party of {} but only {} usable ticket(s)",
                            size,
                            wallet.valid_for(&restaurant_id)
                        )
                        .yellow()
                    );
                }
            }

            let ticket = client
                .join(&restaurant_id, &user, party_size)
                .await
                .context("Failed to join queue")?;

            if cli.json {
                println!("{}", serde_json::json!({ "success": true, "queueNumber": ticket }));
            } else {
                println!(
                    "{}",
                    format!("✓ Joined {} with ticket #{}", restaurant_id, ticket)
                        .green()
                        .bold()
                );
            }
        }

        Commands::Leave {
            restaurant_id,
            user,
        } => {
            client
                .leave(&restaurant_id, &user)
                .await
                .context("Failed to leave queue")?;

            if cli.json {
                println!("{}", serde_json::json!({ "success": true }));
            } else {
                println!("{}", format!("✓ Left {}", restaurant_id).green().bold());
            }
        }

        Commands::Stats => {
            let stats = client.stats().await.context("Failed to fetch stats")?;

            if cli.json {
                let rows: Vec<_> = stats
                    .establishments
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "restaurantId": e.restaurant_id,
                            "totalQueueSize": e.total_queue_size,
                            "currentNumber": e.current_number,
                            "nextTicketNumber": e.next_ticket_number,
                            "currentStatus": e.current_status,
                        })
                    })
                    .collect();
                let body = serde_json::json!({
                    "establishments": rows,
                    "uptimeSeconds": stats.uptime_seconds,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!("{}", "Waitline Status".cyan().bold());
            println!();
            println!("  {} {}", "URL:".bold(), cli.url);
            println!("  {} {} seconds", "Uptime:".bold(), stats.uptime_seconds);
            println!();

            if stats.establishments.is_empty() {
                println!("{}", "No queues yet".yellow());
            } else {
                let rows: Vec<StatsRow> = stats
                    .establishments
                    .into_iter()
                    .map(|e| StatsRow {
                        restaurant_id: e.restaurant_id,
                        total_queue_size: e.total_queue_size,
                        current_number: e.current_number,
                        next_ticket_number: e.next_ticket_number,
                        current_status: e.current_status,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Watch {
            restaurant_id,
            user,
            join,
            party_size,
            emergency_stop,
            ticks,
        } => {
            let mut reconciler =
                ClientReconciler::new(client, Arc::new(ThreadRandomSource), &restaurant_id, &user);
            reconciler.set_emergency_stop(emergency_stop);

            if join {
                let ticket = reconciler.join(party_size).await?;
                let note = match reconciler.mode() {
                    SyncMode::Live => "".normal(),
                    SyncMode::Simulated => " (provisional, service unreachable)".yellow(),
                };
                println!("{}{}", format!("✓ Ticket #{}", ticket).green().bold(), note);
            }

            let mut poll = interval(POLL_INTERVAL);
            poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut done = 0u64;

            loop {
                tokio::select! {
                    _ = poll.tick() => {}
                    _ = tokio::signal::ctrl_c() => break,
                }

                let mode = reconciler.tick().await?;
                let view = reconciler.view();

                if cli.json {
                    println!("{}", serde_json::to_string(view)?);
                } else {
                    let mode = match mode {
                        SyncMode::Live => "LIVE".green(),
                        SyncMode::Simulated => "SIMULATED".yellow(),
                    };
                    let position = match view.my_queue_number {
                        Some(n) => format!("#{} ahead {:>3}", n, view.people_ahead),
                        None => "not queued".to_string(),
                    };
                    println!(
                        "[{}] {}  waiting {:>3}  ~{:>3} min  {}",
                        mode,
                        position,
                        view.total_queue_size,
                        view.estimated_wait_time_minutes,
                        status_label(view.current_status)
                    );
                }

                done += 1;
                if ticks.is_some_and(|limit| done >= limit) {
                    break;
                }
            }

            if join {
                reconciler.leave().await?;
                println!("{}", "✓ Left queue".green().bold());
            }
        }
    }

    Ok(())
}

//! Simple SDK Example
//!
//! Demonstrates basic usage of the Waitline SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package waitline-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package waitline-sdk --example simple
//!    ```

use waitline_sdk::WaitlineClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Waitline SDK - Simple Example");
    println!("=============================\n");

    let client = WaitlineClient::new("http://127.0.0.1:4000")?;

    // 1. Health check
    let health = client.health().await?;
    println!("1. Service {} (v{})\n", health.status, health.version);

    // 2. Join
    let ticket = client.join("cafe-a", "example-user", Some(2)).await?;
    println!("2. Joined cafe-a with ticket #{}\n", ticket);

    // 3. Status
    let view = client.status("cafe-a", Some("example-user")).await?;
    println!("3. Queue status");
    println!("   People ahead: {}", view.people_ahead);
    println!("   Wait:         ~{} min", view.estimated_wait_time_minutes);
    println!("   Status:       {}\n", view.current_status);

    // 4. Leave
    client.leave("cafe-a", "example-user").await?;
    println!("4. Left the queue");

    Ok(())
}

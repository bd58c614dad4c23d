//! Waitline SDK - Rust Client Library
//!
//! Provides a client for the Waitline queue service and a reconciler that
//! keeps a participant's view alive when the service cannot be reached.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use waitline_core::port::random_source::ThreadRandomSource;
//! use waitline_sdk::{ClientReconciler, SyncMode, WaitlineClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WaitlineClient::new("http://127.0.0.1:4000")?;
//!     let mut reconciler =
//!         ClientReconciler::new(client, Arc::new(ThreadRandomSource), "cafe-a", "user-1");
//!
//!     let ticket = reconciler.join(Some(2)).await?;
//!     println!("Ticket: {}", ticket);
//!
//!     if reconciler.tick().await? == SyncMode::Simulated {
//!         println!("Service unreachable, showing estimate");
//!     }
//!     println!("People ahead: {}", reconciler.view().people_ahead);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod reconciler;
mod reply;
mod types;
mod wallet;

pub use client::{WaitlineClient, REQUEST_TIMEOUT};
pub use error::{Result, SdkError};
pub use reconciler::{ClientReconciler, SyncMode, POLL_INTERVAL};
pub use reply::ServiceReply;
pub use types::{
    EstablishmentStats, HealthResponse, JoinRequest, JoinResponse, LeaveRequest, LeaveResponse,
    QueueStatusView, StatsResponse,
};
pub use wallet::{Ticket, TicketStatus, TicketWallet, WalletError};

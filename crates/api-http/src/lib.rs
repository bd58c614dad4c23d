//! HTTP API Layer
//!
//! JSON over HTTP for the Waitline queue engine: status, join and leave for
//! clients, plus health and stats endpoints for operators.

pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use router::router;
pub use server::{HttpServer, HttpServerConfig};
pub use state::AppState;

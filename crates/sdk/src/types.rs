//! SDK Request/Response Types
//!
//! Mirrors the HTTP wire types from the api-http crate.

use serde::{Deserialize, Serialize};
use waitline_core::domain::{QueueStatus, TicketNumber};

pub use waitline_core::domain::QueueStatusView;

/// Body of `POST /queue/join`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub restaurant_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub success: bool,
    pub queue_number: TicketNumber,
}

/// Body of `POST /queue/leave`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub restaurant_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveResponse {
    pub success: bool,
}

/// `{success: false, error}` body of a failed request
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub establishments: Vec<EstablishmentStats>,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentStats {
    pub restaurant_id: String,
    pub total_queue_size: u32,
    pub current_number: TicketNumber,
    pub next_ticket_number: TicketNumber,
    pub current_status: QueueStatus,
}

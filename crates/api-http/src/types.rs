//! HTTP Request/Response Types
//!
//! Wire shapes of the queue API. All field names are camelCase.

use serde::{Deserialize, Serialize};
use waitline_core::domain::{QueueStatus, TicketNumber};

/// GET /queue/{restaurantId} query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    #[serde(default, alias = "userId")]
    pub participant_id: Option<String>,
}

/// POST /queue/join body
///
/// Every field is optional at the wire level so a missing id is reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBody {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub party_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinReply {
    pub success: bool,
    pub queue_number: TicketNumber,
}

/// POST /queue/leave body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBody {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveReply {
    pub success: bool,
}

/// Failure body shared by every endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReply {
    pub success: bool,
    pub error: String,
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /admin/stats query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// Restrict the report to one establishment
    #[serde(default)]
    pub restaurant_id: Option<String>,
}

/// GET /admin/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReply {
    pub establishments: Vec<EstablishmentStats>,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentStats {
    pub restaurant_id: String,
    pub total_queue_size: u32,
    pub current_number: TicketNumber,
    pub next_ticket_number: TicketNumber,
    pub current_status: QueueStatus,
}

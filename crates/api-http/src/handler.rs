//! HTTP Method Handlers

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{
    EstablishmentStats, HealthReply, JoinBody, JoinReply, LeaveBody, LeaveReply, StatsQuery,
    StatsReply, StatusQuery,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::Json;
use waitline_core::application::queue::JoinRequest;
use waitline_core::domain::{QueueStatus, QueueStatusView};
use waitline_core::port::QueueStore;

/// GET /queue/{restaurantId}
pub async fn get_status(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<QueueStatusView>, ApiError> {
    status_view(&state, &restaurant_id, &query).await
}

/// GET /queue/join
///
/// The static POST route shadows the path parameter, so establishments
/// literally named `join` or `leave` are answered here.
pub async fn get_join_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<QueueStatusView>, ApiError> {
    status_view(&state, "join", &query).await
}

/// GET /queue/leave
pub async fn get_leave_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<QueueStatusView>, ApiError> {
    status_view(&state, "leave", &query).await
}

async fn status_view(
    state: &AppState,
    restaurant_id: &str,
    query: &StatusQuery,
) -> Result<Json<QueueStatusView>, ApiError> {
    let view = state
        .service
        .status(restaurant_id, query.participant_id.as_deref())
        .await?;
    Ok(Json(view))
}

/// POST /queue/join
pub async fn join(
    State(state): State<AppState>,
    body: Result<Json<JoinBody>, JsonRejection>,
) -> Result<Json<JoinReply>, ApiError> {
    let Json(body) = body?;

    let res = state
        .service
        .join(JoinRequest {
            establishment_id: body.restaurant_id.unwrap_or_default(),
            participant_id: body.user_id.unwrap_or_default(),
            party_size: body.party_size,
        })
        .await?;

    Ok(Json(JoinReply {
        success: true,
        queue_number: res.queue_number,
    }))
}

/// POST /queue/leave
pub async fn leave(
    State(state): State<AppState>,
    body: Result<Json<LeaveBody>, JsonRejection>,
) -> Result<Json<LeaveReply>, ApiError> {
    let Json(body) = body?;

    state
        .service
        .leave(
            body.restaurant_id.as_deref().unwrap_or_default(),
            body.user_id.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(LeaveReply { success: true }))
}

/// GET /health
pub async fn health() -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok",
        version: waitline_core::VERSION,
    })
}

/// GET /admin/stats
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsReply>, ApiError> {
    let mut establishments = Vec::new();

    for id in state.store.establishments().await? {
        if let Some(filter) = query.restaurant_id.as_deref() {
            if filter != id {
                continue;
            }
        }

        let queue = state.store.snapshot(&id).await?;
        let total = u32::try_from(queue.len()).unwrap_or(u32::MAX);
        establishments.push(EstablishmentStats {
            restaurant_id: id,
            total_queue_size: total,
            current_number: queue.current_number(),
            next_ticket_number: queue.next_ticket_number(),
            current_status: QueueStatus::classify(total),
        });
    }

    Ok(Json(StatsReply {
        establishments,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// Unknown route
pub async fn not_found(uri: OriginalUri) -> ApiError {
    ApiError::NotFound(format!("not found: {}", uri.0.path()))
}

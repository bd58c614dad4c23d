//! Waitline Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ErrorResponse, HealthResponse, JoinRequest, JoinResponse, LeaveRequest, LeaveResponse,
    QueueStatusView, StatsResponse,
};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use waitline_core::domain::TicketNumber;

/// Per-request timeout; a slower poll is abandoned and the next tick supersedes it
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Waitline Engine Client
///
/// Thin wrapper over the HTTP API. Cheap to clone.
///
/// # Example
///
/// ```no_run
/// use waitline_sdk::WaitlineClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WaitlineClient::new("http://127.0.0.1:4000")?;
/// let ticket = client.join("cafe-a", "user-1", Some(2)).await?;
/// let view = client.status("cafe-a", Some("user-1")).await?;
/// assert_eq!(view.my_queue_number, Some(ticket));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WaitlineClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WaitlineClient {
    /// Client with the default 2 second request timeout
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let raw = base_url.as_ref();
        let base_url =
            Url::parse(raw).map_err(|e| SdkError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(SdkError::InvalidUrl(format!(
                "{}: expected an http(s) base URL",
                raw
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /queue/{restaurantId}`
    pub async fn status(
        &self,
        restaurant_id: &str,
        participant_id: Option<&str>,
    ) -> Result<QueueStatusView> {
        let mut url = self.endpoint(&["queue", restaurant_id])?;
        if let Some(id) = participant_id {
            url.query_pairs_mut().append_pair("participantId", id);
        }

        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `POST /queue/join`. Returns the (possibly pre-existing) ticket.
    pub async fn join(
        &self,
        restaurant_id: &str,
        user_id: &str,
        party_size: Option<i64>,
    ) -> Result<TicketNumber> {
        let body = JoinRequest {
            restaurant_id: restaurant_id.to_string(),
            user_id: user_id.to_string(),
            party_size,
        };
        let response: JoinResponse = self.post(&["queue", "join"], &body).await?;
        Ok(response.queue_number)
    }

    /// `POST /queue/leave`
    pub async fn leave(&self, restaurant_id: &str, user_id: &str) -> Result<()> {
        let body = LeaveRequest {
            restaurant_id: restaurant_id.to_string(),
            user_id: user_id.to_string(),
        };
        let _: LeaveResponse = self.post(&["queue", "leave"], &body).await?;
        Ok(())
    }

    /// `GET /admin/stats`
    pub async fn stats(&self) -> Result<StatsResponse> {
        let url = self.endpoint(&["admin", "stats"])?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint(&["health"])?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(SdkError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SdkError::Decode(e.to_string()))
}

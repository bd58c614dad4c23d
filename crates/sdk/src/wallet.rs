//! Locally held meal tickets
//!
//! The service never checks tickets; the wallet only decides whether a
//! client offers the join action and whether to warn about party size.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Unused,
    Used,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub restaurant_id: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub menu_name: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub purchase_date: String,
    pub status: TicketStatus,
    pub qr_code_data: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Failed to read ticket file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed ticket file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketWallet {
    tickets: Vec<Ticket>,
}

impl TicketWallet {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    /// Load a JSON array of tickets
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Unused tickets for this establishment
    pub fn valid_for(&self, restaurant_id: &str) -> usize {
        self.tickets
            .iter()
            .filter(|t| t.restaurant_id == restaurant_id && t.status == TicketStatus::Unused)
            .count()
    }

    /// Gate for the join action
    pub fn can_join(&self, restaurant_id: &str) -> bool {
        self.valid_for(restaurant_id) > 0
    }

    /// False when the party is larger than the number of usable tickets
    pub fn covers_party(&self, restaurant_id: &str, party_size: u32) -> bool {
        self.valid_for(restaurant_id) >= party_size as usize
    }

    /// Mark the unused ticket with this QR payload as used
    pub fn redeem(&mut self, qr_code_data: &str) -> bool {
        match self
            .tickets
            .iter_mut()
            .find(|t| t.qr_code_data == qr_code_data && t.status == TicketStatus::Unused)
        {
            Some(ticket) => {
                ticket.status = TicketStatus::Used;
                true
            }
            None => false,
        }
    }
}

//! Transaction history models

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One cross-chain transfer as reported by the history service.
///
/// Amounts, fees and timestamps stay as the strings the service sent; they are only
/// parsed at display time (see `utils::format`) so an odd value never breaks a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_network: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_network: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_tx_hash: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_tx_hash: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_sender: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_deposit_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_asset_symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_asset_symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_amount: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub destination_amount: String,
    #[serde(default, deserialize_with = "lenient_decimals")]
    pub source_asset_decimals: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimals")]
    pub destination_asset_decimals: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fee: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_block_timestamp: String,
}

impl TransactionRecord {
    /// Classify the raw status. The raw string itself is kept in `status`.
    pub fn status_kind(&self) -> TransferStatus {
        TransferStatus::classify(&self.status)
    }
}

/// Known transfer states. Anything else the service invents lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Confirmed,
    Error,
    Failed,
    Other,
}

impl TransferStatus {
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => TransferStatus::Pending,
            "confirmed" => TransferStatus::Confirmed,
            "error" => TransferStatus::Error,
            "failed" => TransferStatus::Failed,
            _ => TransferStatus::Other,
        }
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, TransferStatus::Error | TransferStatus::Failed)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Confirmed => "confirmed",
            TransferStatus::Error => "error",
            TransferStatus::Failed => "failed",
            TransferStatus::Other => "other",
        };
        f.write_str(label)
    }
}

/// A validated page of history plus the pagination metadata that came with it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPage {
    pub records: Vec<TransactionRecord>,
    /// Page that was requested, 1-based
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_history: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decimals arrive as a number on most rows and as a string on some. Anything that is not a
/// small non-negative integer becomes `None` instead of failing the whole page.
fn lenient_decimals<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

use tracing::{info, warn};

use crate::models::{PathKind, TransactionRecord};
use crate::services::history_service::HistoryController;

/// Clickable cells of a history row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    FromHash,
    FromAddress,
    ToAddress,
    ToHash,
}

impl LinkField {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.to_lowercase().as_str() {
            "from-hash" | "fh" => Ok(LinkField::FromHash),
            "from-address" | "fa" => Ok(LinkField::FromAddress),
            "to-address" | "ta" => Ok(LinkField::ToAddress),
            "to-hash" | "th" => Ok(LinkField::ToHash),
            other => Err(format!(
                "Unknown field '{}'. Use from-hash, from-address, to-address or to-hash",
                other
            )),
        }
    }

    /// `(network, kind, value)` the cell links to.
    ///
    /// The sender cell opens the source transaction: the sender address alone says
    /// nothing about this transfer.
    pub fn target<'a>(&self, record: &'a TransactionRecord) -> (&'a str, PathKind, &'a str) {
        match self {
            LinkField::FromHash | LinkField::FromAddress => (
                record.source_network.as_str(),
                PathKind::Tx,
                record.source_tx_hash.as_str(),
            ),
            LinkField::ToAddress => (
                record.destination_network.as_str(),
                PathKind::Address,
                record.destination_address.as_str(),
            ),
            LinkField::ToHash => (
                record.destination_network.as_str(),
                PathKind::Tx,
                record.destination_tx_hash.as_str(),
            ),
        }
    }
}

/// `open <row> <field>`: resolve the explorer link and hand it to the system browser
pub fn execute(controller: &HistoryController, args: &[&str]) -> Result<String, String> {
    let url = resolve_row_link(controller, args)?;

    match open::that(&url) {
        Ok(()) => {
            info!("Opened explorer link {}", url);
            Ok(format!("Opened {}", url))
        }
        Err(e) => {
            warn!("Could not launch a browser for {}: {}", url, e);
            Ok(format!("Could not launch a browser, open it manually: {}", url))
        }
    }
}

/// Resolve `<row> <field>` on the current page to an explorer URL
pub fn resolve_row_link(controller: &HistoryController, args: &[&str]) -> Result<String, String> {
    let (row, field) = match args {
        [row, field] => (*row, *field),
        _ => return Err("Usage: open <row> <from-hash|from-address|to-address|to-hash>".to_string()),
    };

    let row: usize = row
        .parse()
        .map_err(|_| format!("Invalid row number '{}'", row))?;
    let field = LinkField::parse(field)?;

    let record = row
        .checked_sub(1)
        .and_then(|index| controller.state().records.get(index))
        .ok_or_else(|| format!("No row {} on this page", row))?;

    let (network, kind, value) = field.target(record);
    controller
        .on_open_explorer(network, kind, value)
        .map_err(|e| e.to_string())
}

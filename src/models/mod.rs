//! Data models for the history view
//!
//! Domain types shared by the fetcher, the pagination state machine and the explorer
//! resolver. Wire envelopes live next to the HTTP client in `api::history`.

pub mod explorer;
pub mod transaction;

pub use explorer::{ExplorerEndpoint, PathKind};
pub use transaction::{HistoryPage, TransactionRecord, TransferStatus};

//! Paginated cross-chain transfer history.
//!
//! `utils::page::Pager` owns the pagination state and decides when to fetch,
//! `api::history::HistoryClient` fetches and validates pages, and
//! `services::explorer_service` turns `(network, hash or address)` into block-explorer URLs.
//! `services::history_service::HistoryController` ties them together for a front end.

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::history::{HistoryClient, HistorySource};
pub use config::Config;
pub use models::{HistoryPage, PathKind, TransactionRecord, TransferStatus};
pub use services::{ExplorerResolver, ExplorerTable, HistoryController};
pub use utils::{FetchError, PageAction, PageState, Pager, ResolutionError};

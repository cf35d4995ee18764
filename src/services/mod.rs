pub mod explorer_service;
pub mod history_service;

pub use explorer_service::{ExplorerResolver, ExplorerTable};
pub use history_service::{FetchOutcome, HistoryController};

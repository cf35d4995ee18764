pub mod client;
pub mod models;

pub use client::{HistoryClient, HistorySource};
pub use models::{parse_wire_count, HistoryResponse};

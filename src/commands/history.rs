use crate::models::TransactionRecord;
use crate::utils::format::{format_amount, format_timestamp, shorten};
use crate::utils::page::{PageState, Phase};
use crate::utils::Table;

const HASH_KEEP: usize = 6;

/// Render the current page: summary line, table, footer
pub fn render(state: &PageState) -> String {
    let mut output = format!("More than {} transactions found\n\n", state.total_history);

    if state.records.is_empty() {
        output.push_str("No transactions on this page.\n");
    } else {
        output.push_str(&records_table(&state.records).render());
    }

    output.push('\n');
    output.push_str(&format!(
        "Page {} of {}  ({} rows per page)",
        state.current_page, state.total_pages, state.page_size
    ));

    match &state.phase {
        Phase::Loading => output.push_str("  [loading...]"),
        Phase::Error(e) => output.push_str(&format!("\nLast request failed: {}", e)),
        Phase::Idle => {}
    }

    output
}

fn records_table(records: &[TransactionRecord]) -> Table {
    let mut table = Table::new(vec![
        "#",
        "Amount",
        "From Chain",
        "From Hash",
        "From Address",
        "To Address",
        "To Hash",
        "To Chain",
        "Time",
        "Status",
    ]);

    for (idx, record) in records.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            format!(
                "{} {}",
                format_amount(&record.destination_amount, record.destination_asset_decimals),
                record.destination_asset_symbol
            )
            .trim_end()
            .to_string(),
            record.source_network.clone(),
            shorten(&record.source_tx_hash, HASH_KEEP),
            shorten(&record.source_sender, HASH_KEEP),
            shorten(&record.destination_address, HASH_KEEP),
            shorten(&record.destination_tx_hash, HASH_KEEP),
            record.destination_network.clone(),
            format_timestamp(&record.source_block_timestamp),
            status_cell(record),
        ]);
    }

    table
}

/// Raw status, flagged when the transfer did not go through
fn status_cell(record: &TransactionRecord) -> String {
    if record.status_kind().is_terminal_failure() {
        format!("{} (!)", record.status)
    } else {
        record.status.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::FetchError;

    fn state(records: Vec<TransactionRecord>, phase: Phase) -> PageState {
        PageState {
            current_page: 2,
            page_size: 10,
            total_pages: 7,
            total_history: 65,
            records,
            phase,
        }
    }

    #[test]
    fn test_render_rows_and_footer() {
        let record = TransactionRecord {
            id: "1".into(),
            source_network: "ethereum".into(),
            destination_network: "bsc".into(),
            source_tx_hash: "0x1111111111111111111111111111111111111111".into(),
            destination_amount: "2500000".into(),
            destination_asset_decimals: Some(6),
            destination_asset_symbol: "USDT".into(),
            source_block_timestamp: "not-a-time".into(),
            status: "Refunded".into(),
            ..Default::default()
        };

        let output = render(&state(vec![record], Phase::Idle));
        assert!(output.starts_with("More than 65 transactions found"));
        assert!(output.contains("2.5000 USDT"));
        assert!(output.contains("0x1111...111111"));
        assert!(output.contains("Refunded"));
        assert!(output.contains("--"));
        assert!(output.ends_with("Page 2 of 7  (10 rows per page)"));
    }

    #[test]
    fn test_status_cell_flags_failures_and_keeps_raw_text() {
        let mut record = TransactionRecord {
            status: "FAILED".into(),
            ..Default::default()
        };
        assert_eq!(status_cell(&record), "FAILED (!)");

        record.status = "error".into();
        assert_eq!(status_cell(&record), "error (!)");

        record.status = "Confirmed".into();
        assert_eq!(status_cell(&record), "Confirmed");

        record.status = "bridging-step-3".into();
        assert_eq!(status_cell(&record), "bridging-step-3");
    }

    #[test]
    fn test_render_loading_and_error_markers() {
        assert!(render(&state(Vec::new(), Phase::Loading)).contains("[loading...]"));

        let failed = render(&state(
            Vec::new(),
            Phase::Error(FetchError::Transport("connection refused".into())),
        ));
        assert!(failed.contains("No transactions on this page."));
        assert!(failed.contains("Last request failed: Request failed: connection refused"));
    }
}

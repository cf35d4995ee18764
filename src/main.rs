use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bridge_history::commands::{self, history, LineOutcome};
use bridge_history::{Config, ExplorerResolver, ExplorerTable, HistoryClient, HistoryController};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they do not interleave with the table on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bridge_history=info,reqwest=warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let table = match &config.explorer_table_path {
        Some(path) => match ExplorerTable::builtin_with_overrides(path) {
            Ok(t) => t,
            Err(e) => {
                error!("{}", e);
                return;
            }
        },
        None => ExplorerTable::builtin(),
    };

    let client = match config.timeout {
        Some(timeout) => match HistoryClient::with_timeout(config.api_url.clone(), timeout) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to create history client: {}", e);
                return;
            }
        },
        None => HistoryClient::with_base_url(config.api_url.clone()),
    };

    info!(
        "Browsing transfer history from {} ({} rows per page, {} explorers)",
        client.base_url(),
        config.page_size,
        table.len()
    );

    let mut controller =
        HistoryController::new(Arc::new(client), ExplorerResolver::new(table), config.page_size);
    controller.mount();

    println!("Loading transactions... type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                match commands::handle_line(&mut controller, &line) {
                    LineOutcome::Quit => break,
                    LineOutcome::Continue(feedback) => {
                        if let Some(feedback) = feedback {
                            println!("{}", feedback);
                        }
                        if controller.state().loading() {
                            println!("{}", history::render(controller.state()));
                        }
                    }
                }
            }
            changed = controller.next_outcome() => {
                if changed {
                    println!("\n{}", history::render(controller.state()));
                }
            }
        }
    }

    info!("Bye");
}

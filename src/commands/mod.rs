pub mod help;
pub mod history;
pub mod navigate;
pub mod open;

use tracing::debug;

use crate::services::history_service::HistoryController;

/// What the input loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print this feedback, if any, and keep reading
    Continue(Option<String>),
    Quit,
}

/// Parse one line of user input and run it against the controller
pub fn handle_line(controller: &mut HistoryController, line: &str) -> LineOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return LineOutcome::Continue(None);
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "first" | "f" | "next" | "n" | "prev" | "p" | "last" | "l" | "reload" | "r" => {
            navigate::execute(controller, &command)
        }
        "size" | "rows" => navigate::set_page_size(controller, args),
        "open" | "o" => open::execute(controller, args),
        "help" | "h" | "?" => Ok(help::execute(controller)),
        "quit" | "q" | "exit" => return LineOutcome::Quit,
        other => Err(format!("Unknown command '{}'. Type `help` for the list.", other)),
    };

    match result {
        Ok(feedback) => LineOutcome::Continue(feedback_or_none(feedback)),
        Err(e) => {
            debug!("Command '{}' failed: {}", command, e);
            LineOutcome::Continue(Some(format!("Error: {}", e)))
        }
    }
}

fn feedback_or_none(feedback: String) -> Option<String> {
    if feedback.is_empty() {
        None
    } else {
        Some(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::history::HistorySource;
    use crate::models::HistoryPage;
    use crate::services::explorer_service::ExplorerResolver;
    use crate::utils::errors::FetchError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FivePages;

    #[async_trait]
    impl HistorySource for FivePages {
        async fn fetch_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, FetchError> {
            Ok(HistoryPage {
                records: Vec::new(),
                page,
                page_size,
                total_pages: 5,
                total_history: 50,
            })
        }
    }

    async fn mounted() -> HistoryController {
        let mut controller = HistoryController::new(Arc::new(FivePages), ExplorerResolver::default(), 10);
        controller.mount();
        controller.settle().await;
        controller
    }

    #[tokio::test]
    async fn test_handle_line_navigates() {
        let mut controller = mounted().await;

        assert_eq!(handle_line(&mut controller, "  "), LineOutcome::Continue(None));
        assert_eq!(handle_line(&mut controller, "N"), LineOutcome::Continue(None));
        controller.settle().await;
        assert_eq!(controller.state().current_page, 2);

        assert_eq!(handle_line(&mut controller, "size 20"), LineOutcome::Continue(None));
        controller.settle().await;
        assert_eq!(controller.state().page_size, 20);
        assert_eq!(controller.state().current_page, 1);
    }

    #[tokio::test]
    async fn test_handle_line_reports_errors_and_quits() {
        let mut controller = mounted().await;

        let LineOutcome::Continue(Some(message)) = handle_line(&mut controller, "jump 3") else {
            panic!("expected an error message");
        };
        assert!(message.contains("Unknown command 'jump'"));

        let LineOutcome::Continue(Some(message)) = handle_line(&mut controller, "prev") else {
            panic!("expected feedback on the first page");
        };
        assert!(message.contains("first page"));

        assert_eq!(handle_line(&mut controller, "quit"), LineOutcome::Quit);
    }
}

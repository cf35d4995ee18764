use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::history::HistorySource;
use crate::models::{HistoryPage, PathKind};
use crate::services::explorer_service::ExplorerResolver;
use crate::utils::errors::{FetchError, ResolutionError};
use crate::utils::page::{FetchCommand, PageAction, PageState, Pager};

/// A finished fetch on its way back to the controller
#[derive(Debug)]
pub struct FetchOutcome {
    pub command: FetchCommand,
    pub result: Result<HistoryPage, FetchError>,
}

/// Drives one `Pager` against a `HistorySource`.
///
/// Fetches run on spawned tasks; their results are queued on a channel and applied one at
/// a time by `next_outcome`, so the page state only ever changes on the task that owns the
/// controller.
pub struct HistoryController {
    pager: Pager,
    source: Arc<dyn HistorySource>,
    explorers: ExplorerResolver,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl HistoryController {
    pub fn new(source: Arc<dyn HistorySource>, explorers: ExplorerResolver, page_size: u32) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            pager: Pager::new(page_size),
            source,
            explorers,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn state(&self) -> &PageState {
        self.pager.state()
    }

    pub fn explorers(&self) -> &ExplorerResolver {
        &self.explorers
    }

    /// True while the latest request has not come back
    pub fn is_waiting(&self) -> bool {
        self.pager.in_flight().is_some()
    }

    /// Load the first page
    pub fn mount(&mut self) {
        let command = self.pager.mount();
        self.spawn_fetch(command);
    }

    pub fn on_first(&mut self) -> bool {
        self.dispatch(PageAction::First)
    }

    pub fn on_prev(&mut self) -> bool {
        self.dispatch(PageAction::Prev)
    }

    pub fn on_next(&mut self) -> bool {
        self.dispatch(PageAction::Next)
    }

    pub fn on_last(&mut self) -> bool {
        self.dispatch(PageAction::Last)
    }

    pub fn on_reload(&mut self) -> bool {
        self.dispatch(PageAction::Reload)
    }

    pub fn on_page_size_change(&mut self, page_size: u32) -> bool {
        self.dispatch(PageAction::SetPageSize(page_size))
    }

    /// Resolve the explorer URL for a hash or address. Opening it is up to the caller.
    pub fn on_open_explorer(
        &self,
        network: &str,
        kind: PathKind,
        value: &str,
    ) -> Result<String, ResolutionError> {
        self.explorers.resolve(network, kind, value)
    }

    /// Apply an action; returns whether a request was issued
    pub fn dispatch(&mut self, action: PageAction) -> bool {
        match self.pager.dispatch(action) {
            Some(command) => {
                self.spawn_fetch(command);
                true
            }
            None => false,
        }
    }

    /// Wait for the next finished fetch and apply it.
    ///
    /// Returns `true` when the state changed, `false` for a stale response.
    pub async fn next_outcome(&mut self) -> bool {
        let Some(outcome) = self.outcome_rx.recv().await else {
            return false;
        };
        self.apply(outcome)
    }

    /// Apply an outcome received outside of `next_outcome`
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let was_current = self.pager.in_flight() == Some(outcome.command);

        if let Some(corrective) = self.pager.on_response(outcome.command, outcome.result) {
            self.spawn_fetch(corrective);
        }

        was_current
    }

    /// Wait until the latest request, including any corrective follow-up, has landed
    pub async fn settle(&mut self) {
        while self.is_waiting() {
            self.next_outcome().await;
        }
    }

    fn spawn_fetch(&self, command: FetchCommand) {
        debug!(
            "Request #{}: page {} size {}",
            command.request_id, command.page, command.page_size
        );

        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_page(command.page, command.page_size).await;
            if tx.send(FetchOutcome { command, result }).is_err() {
                info!("History view closed before request #{} finished", command.request_id);
            }
        });
    }
}

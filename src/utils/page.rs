//! Pagination state machine for the history view.
//!
//! `Pager` never performs I/O. Every transition that needs data returns a `FetchCommand`;
//! whoever runs the command hands the result back through `on_response`. Each command
//! carries a monotonic request id and only the most recently issued one is accepted, so a
//! slow early response can never overwrite a faster later one.

use tracing::{debug, info, warn};

use crate::models::{HistoryPage, TransactionRecord};
use crate::utils::errors::FetchError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Navigation requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
    Reload,
    SetPageSize(u32),
}

/// A fetch the caller must perform and report back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchCommand {
    pub request_id: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Error(FetchError),
}

/// Everything the presentation layer reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_history: u64,
    pub records: Vec<TransactionRecord>,
    pub phase: Phase,
}

impl PageState {
    fn initial(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            total_history: 0,
            records: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        match &self.phase {
            Phase::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }
}

pub struct Pager {
    state: PageState,
    /// `(page, page_size)` of the records currently held
    committed: (u32, u32),
    in_flight: Option<FetchCommand>,
    next_request_id: u64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        let state = PageState::initial(page_size);
        let committed = (state.current_page, state.page_size);
        Pager {
            state,
            committed,
            in_flight: None,
            next_request_id: 1,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The request whose response will be accepted, if any
    pub fn in_flight(&self) -> Option<FetchCommand> {
        self.in_flight
    }

    /// Initial load when the view appears
    pub fn mount(&mut self) -> FetchCommand {
        self.request(self.state.current_page)
    }

    /// Apply a user action. `None` means the action was a no-op.
    pub fn dispatch(&mut self, action: PageAction) -> Option<FetchCommand> {
        if let PageAction::SetPageSize(size) = action {
            return Some(self.set_page_size(size));
        }

        if self.state.loading() {
            debug!("Ignoring {:?} while a page is loading", action);
            return None;
        }

        let current = self.state.current_page;
        let total = self.state.total_pages;

        let target = match action {
            PageAction::First if current != 1 => 1,
            PageAction::Prev if current > 1 => current - 1,
            PageAction::Next if current < total => current + 1,
            PageAction::Last if current != total => total,
            PageAction::Reload => current,
            _ => return None,
        };

        Some(self.request(target))
    }

    fn set_page_size(&mut self, size: u32) -> FetchCommand {
        let size = size.max(1);
        if let Some(superseded) = self.in_flight {
            debug!(
                "Page size change to {} supersedes request #{}",
                size, superseded.request_id
            );
        }
        self.state.page_size = size;
        self.request(1)
    }

    fn request(&mut self, page: u32) -> FetchCommand {
        let command = FetchCommand {
            request_id: self.next_request_id,
            page,
            page_size: self.state.page_size,
        };
        self.next_request_id += 1;

        self.state.current_page = page;
        self.state.phase = Phase::Loading;
        self.in_flight = Some(command);
        command
    }

    /// Feed back the result of a `FetchCommand`.
    ///
    /// Returns a corrective command when the server reports fewer pages than the page that
    /// was requested.
    pub fn on_response(
        &mut self,
        command: FetchCommand,
        result: Result<HistoryPage, FetchError>,
    ) -> Option<FetchCommand> {
        match self.in_flight {
            Some(current) if current.request_id == command.request_id => {}
            _ => {
                debug!(
                    "Dropping stale response for request #{} (page {}, size {})",
                    command.request_id, command.page, command.page_size
                );
                return None;
            }
        }
        self.in_flight = None;

        match result {
            Ok(page) => self.apply_page(command, page),
            Err(e) => {
                warn!(
                    "Failed to load page {} (size {}): {}",
                    command.page, command.page_size, e
                );
                // totals may already reflect a shrunk history from a corrective fetch
                let (page, page_size) = self.committed;
                self.state.current_page = page.min(self.state.total_pages);
                self.state.page_size = page_size;
                self.state.phase = Phase::Error(e);
                None
            }
        }
    }

    fn apply_page(&mut self, command: FetchCommand, page: HistoryPage) -> Option<FetchCommand> {
        let total_pages = page.total_pages.max(1);
        self.state.total_pages = total_pages;
        self.state.total_history = page.total_history;

        if command.page > total_pages {
            info!(
                "Page {} no longer exists ({} page(s) reported), moving to page {}",
                command.page, total_pages, total_pages
            );
            return Some(self.request(total_pages));
        }

        self.state.records = page.records;
        self.state.current_page = command.page;
        self.state.page_size = command.page_size;
        self.state.phase = Phase::Idle;
        self.committed = (command.page, command.page_size);
        None
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(cmd: FetchCommand, total_pages: u32, total_history: u64) -> HistoryPage {
        let records = (0..cmd.page_size.min(3))
            .map(|i| TransactionRecord {
                id: format!("p{}-s{}-{}", cmd.page, cmd.page_size, i),
                ..Default::default()
            })
            .collect();
        HistoryPage {
            records,
            page: cmd.page,
            page_size: cmd.page_size,
            total_pages,
            total_history,
        }
    }

    /// Mount and complete the first load with `total_pages` pages
    fn loaded(total_pages: u32) -> Pager {
        let mut pager = Pager::default();
        let cmd = pager.mount();
        assert!(pager.on_response(cmd, Ok(page(cmd, total_pages, 42))).is_none());
        pager
    }

    #[test]
    fn test_initial_state() {
        let pager = Pager::default();
        let state = pager.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 10);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.total_history, 0);
        assert!(!state.loading());
    }

    #[test]
    fn test_mount_requests_first_page() {
        let mut pager = Pager::default();
        let cmd = pager.mount();
        assert_eq!((cmd.page, cmd.page_size), (1, 10));
        assert!(pager.state().loading());
    }

    #[test]
    fn test_navigation_guards_at_boundaries() {
        let mut pager = loaded(3);
        assert_eq!(pager.dispatch(PageAction::First), None);
        assert_eq!(pager.dispatch(PageAction::Prev), None);

        let cmd = pager.dispatch(PageAction::Last).unwrap();
        assert_eq!(cmd.page, 3);
        pager.on_response(cmd, Ok(page(cmd, 3, 42)));

        assert_eq!(pager.dispatch(PageAction::Next), None);
        assert_eq!(pager.dispatch(PageAction::Last), None);
        assert!(pager.state().is_last());
    }

    #[test]
    fn test_navigation_ignored_while_loading() {
        let mut pager = loaded(5);
        let first = pager.dispatch(PageAction::Next).unwrap();
        assert_eq!(first.page, 2);

        // double click
        assert_eq!(pager.dispatch(PageAction::Next), None);
        assert_eq!(pager.dispatch(PageAction::Last), None);
        assert_eq!(pager.dispatch(PageAction::Reload), None);
        assert_eq!(pager.in_flight(), Some(first));
    }

    #[test]
    fn test_page_stays_in_bounds_for_any_sequence() {
        let actions = [
            PageAction::Next,
            PageAction::Next,
            PageAction::Last,
            PageAction::Next,
            PageAction::Prev,
            PageAction::First,
            PageAction::Prev,
            PageAction::Last,
            PageAction::Prev,
            PageAction::Prev,
            PageAction::Next,
            PageAction::First,
        ];

        for total in 1..=4 {
            let mut pager = loaded(total);
            for round in 0..3 {
                for action in actions.iter().cycle().skip(round).take(actions.len()) {
                    if let Some(cmd) = pager.dispatch(*action) {
                        pager.on_response(cmd, Ok(page(cmd, total, 42)));
                    }
                    let state = pager.state();
                    assert!(state.current_page >= 1);
                    assert!(state.current_page <= state.total_pages);
                }
            }
        }
    }

    #[test]
    fn test_set_page_size_resets_to_first_page() {
        let mut pager = loaded(5);
        let cmd = pager.dispatch(PageAction::Last).unwrap();
        pager.on_response(cmd, Ok(page(cmd, 5, 42)));
        assert_eq!(pager.state().current_page, 5);

        let cmd = pager.dispatch(PageAction::SetPageSize(50)).unwrap();
        assert_eq!((cmd.page, cmd.page_size), (1, 50));
        assert_eq!(pager.state().current_page, 1);

        pager.on_response(cmd, Ok(page(cmd, 1, 42)));
        assert_eq!(pager.state().page_size, 50);
        assert_eq!(pager.in_flight(), None);
    }

    #[test]
    fn test_set_page_size_clamps_to_one() {
        let mut pager = loaded(5);
        let cmd = pager.dispatch(PageAction::SetPageSize(0)).unwrap();
        assert_eq!(cmd.page_size, 1);
    }

    #[test]
    fn test_set_page_size_supersedes_in_flight_request() {
        let mut pager = loaded(5);
        let a = pager.dispatch(PageAction::Next).unwrap();
        let b = pager.dispatch(PageAction::SetPageSize(20)).unwrap();
        assert!(b.request_id > a.request_id);

        // B lands first, then the slower A
        assert!(pager.on_response(b, Ok(page(b, 3, 42))).is_none());
        assert!(pager.on_response(a, Ok(page(a, 5, 42))).is_none());

        let state = pager.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.records[0].id, "p1-s20-0");
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_response_ignored_when_it_lands_first() {
        let mut pager = loaded(5);
        let a = pager.dispatch(PageAction::Next).unwrap();
        let b = pager.dispatch(PageAction::SetPageSize(20)).unwrap();

        assert!(pager.on_response(a, Ok(page(a, 5, 42))).is_none());
        assert!(pager.state().loading());
        assert_eq!(pager.state().page_size, 20);

        pager.on_response(b, Ok(page(b, 3, 42)));
        assert_eq!(pager.state().records[0].id, "p1-s20-0");
    }

    #[test]
    fn test_shrunk_history_clamps_with_one_corrective_fetch() {
        let mut pager = loaded(2);
        let next = pager.dispatch(PageAction::Next).unwrap();
        assert_eq!(next.page, 2);

        let corrective = pager
            .on_response(next, Ok(page(next, 1, 3)))
            .expect("corrective fetch");
        assert_eq!((corrective.page, corrective.page_size), (1, 10));
        assert_eq!(pager.state().current_page, 1);
        assert_eq!(pager.state().total_pages, 1);
        assert_eq!(pager.state().total_history, 3);
        assert!(pager.state().loading());

        assert!(pager.on_response(corrective, Ok(page(corrective, 1, 3))).is_none());
        assert!(!pager.state().loading());
        assert_eq!(pager.state().current_page, 1);
    }

    #[test]
    fn test_zero_total_pages_is_stored_as_one() {
        let mut pager = Pager::default();
        let cmd = pager.mount();
        assert!(pager.on_response(cmd, Ok(page(cmd, 0, 0))).is_none());
        assert_eq!(pager.state().total_pages, 1);
        assert_eq!(pager.state().current_page, 1);
    }

    #[test]
    fn test_failure_keeps_last_good_page() {
        let mut pager = loaded(5);
        let before = pager.state().clone();

        let cmd = pager.dispatch(PageAction::Next).unwrap();
        let err = FetchError::MalformedResponse("total_page is not a non-negative integer: 'abc'".into());
        assert!(pager.on_response(cmd, Err(err.clone())).is_none());

        let state = pager.state();
        assert_eq!(state.last_error(), Some(&err));
        assert!(!state.loading());
        assert_eq!(state.total_pages, before.total_pages);
        assert_eq!(state.current_page, before.current_page);
        assert_eq!(state.records, before.records);

        // navigation is enabled again
        assert_eq!(pager.dispatch(PageAction::Next).map(|c| c.page), Some(2));
    }

    #[test]
    fn test_failed_page_size_change_restores_previous_size() {
        let mut pager = loaded(5);
        let cmd = pager.dispatch(PageAction::SetPageSize(30)).unwrap();
        pager.on_response(cmd, Err(FetchError::Transport("connection reset".into())));
        assert_eq!(pager.state().page_size, 10);
        assert_eq!(pager.state().current_page, 1);
    }

    #[test]
    fn test_failed_corrective_fetch_stays_in_bounds() {
        let mut pager = loaded(5);
        let last = pager.dispatch(PageAction::Last).unwrap();
        pager.on_response(last, Ok(page(last, 5, 42)));

        let reload = pager.dispatch(PageAction::Reload).unwrap();
        let corrective = pager.on_response(reload, Ok(page(reload, 2, 15))).unwrap();
        assert_eq!(corrective.page, 2);

        pager.on_response(corrective, Err(FetchError::Transport("connection reset".into())));

        let state = pager.state();
        assert_eq!(state.total_pages, 2);
        assert_eq!(state.current_page, 2);
        assert!(!state.loading());
        assert_eq!(pager.dispatch(PageAction::Last), None);
        assert_eq!(pager.dispatch(PageAction::Next), None);
    }

    #[test]
    fn test_reload_after_error() {
        let mut pager = loaded(5);
        let cmd = pager.dispatch(PageAction::Next).unwrap();
        pager.on_response(
            cmd,
            Err(FetchError::Status {
                status: 502,
                body: "Bad Gateway".into(),
            }),
        );

        let retry = pager.dispatch(PageAction::Reload).unwrap();
        assert_eq!((retry.page, retry.page_size), (1, 10));
        pager.on_response(retry, Ok(page(retry, 5, 42)));
        assert_eq!(pager.state().last_error(), None);
    }

    #[test]
    fn test_last_then_prev_scenario() {
        let mut pager = Pager::default();
        let mut issued = Vec::new();

        let cmd = pager.mount();
        issued.push((cmd.page, cmd.page_size));
        pager.on_response(cmd, Ok(page(cmd, 5, 48)));

        let cmd = pager.dispatch(PageAction::Last).unwrap();
        issued.push((cmd.page, cmd.page_size));
        pager.on_response(cmd, Ok(page(cmd, 5, 48)));

        let cmd = pager.dispatch(PageAction::Prev).unwrap();
        issued.push((cmd.page, cmd.page_size));
        pager.on_response(cmd, Ok(page(cmd, 5, 48)));

        assert_eq!(issued, vec![(1, 10), (5, 10), (4, 10)]);
        assert_eq!(pager.state().current_page, 4);
    }
}

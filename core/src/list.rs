//! Controller behind the record list view.
//!
//! # Design
//! The list is whatever the last successful fetch returned. It changes in
//! exactly two ways: a new fetch replaces it, and a delete the service has
//! confirmed removes one entry. A failed delete leaves both the list and
//! the `Ready` state alone and surfaces only as a notice.

use crate::client::RecordClient;
use crate::dialogs::Dialogs;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::state::{PendingRequest, RequestGuard, RequestState, RequestTicket};
use crate::transport::Transport;
use crate::types::{Record, RecordId};

pub const LOAD_FAILED: &str = "Failed to load users. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete user. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outstanding {
    Load,
    Remove { id: RecordId, name: String },
}

#[derive(Debug)]
pub struct ListController<D> {
    client: RecordClient,
    dialogs: D,
    state: RequestState<Vec<Record>>,
    guard: RequestGuard,
    outstanding: Option<Outstanding>,
}

impl<D: Dialogs> ListController<D> {
    pub fn new(client: RecordClient, dialogs: D) -> Self {
        Self {
            client,
            dialogs,
            state: RequestState::Idle,
            guard: RequestGuard::new(),
            outstanding: None,
        }
    }

    pub fn state(&self) -> &RequestState<Vec<Record>> {
        &self.state
    }

    /// The current `Ready` list; empty in every other state.
    pub fn records(&self) -> &[Record] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self) -> usize {
        self.records().len()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn begin_load(&mut self) -> Option<PendingRequest> {
        let ticket = self.guard.begin()?;
        tracing::debug!("loading record list");
        self.state = RequestState::Loading;
        self.outstanding = Some(Outstanding::Load);
        Some(PendingRequest {
            ticket,
            request: self.client.build_list_records(),
        })
    }

    /// Apply the outcome of `begin_load`. Returns whether it was applied.
    pub fn complete_load(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        if self.outstanding != Some(Outstanding::Load) || !self.guard.finish(ticket) {
            return false;
        }
        self.outstanding = None;
        match outcome.and_then(|response| self.client.parse_list_records(response)) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "record list ready");
                self.state = RequestState::Ready(records);
            }
            Err(e) => {
                tracing::warn!(error = %e, "record list fetch failed");
                self.state = RequestState::Error(LOAD_FAILED.to_string());
            }
        }
        true
    }

    /// Reload after a failure (or on demand).
    pub fn retry(&mut self) -> Option<PendingRequest> {
        self.begin_load()
    }

    /// Ask the operator to confirm, then issue the delete. Nothing is issued
    /// unless the list is `Ready`, idle, contains `id`, and the operator agrees.
    pub fn begin_remove(&mut self, id: RecordId) -> Option<PendingRequest> {
        if self.guard.is_busy() {
            return None;
        }
        let name = self.records().iter().find(|r| r.id == id)?.name.clone();
        if !self.dialogs.confirm(&format!("Are you sure you want to delete {name}?")) {
            tracing::debug!(id, "delete declined");
            return None;
        }
        let ticket = self.guard.begin()?;
        tracing::debug!(id, "deleting record");
        self.outstanding = Some(Outstanding::Remove { id, name });
        Some(PendingRequest {
            ticket,
            request: self.client.build_delete_record(id),
        })
    }

    /// Apply the outcome of `begin_remove`. Returns whether it was applied.
    pub fn complete_remove(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        let Some(Outstanding::Remove { id, name }) = self.outstanding.clone() else {
            return false;
        };
        if !self.guard.finish(ticket) {
            return false;
        }
        self.outstanding = None;
        match outcome.and_then(|response| self.client.parse_delete_record(response)) {
            Ok(()) => {
                if let RequestState::Ready(records) = &mut self.state {
                    if let Some(pos) = records.iter().position(|r| r.id == id) {
                        records.remove(pos);
                    }
                }
                tracing::debug!(id, remaining = self.count(), "record deleted");
                self.dialogs.notify(&format!("{name} has been deleted successfully."));
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "record delete failed");
                self.dialogs.notify(DELETE_FAILED);
            }
        }
        true
    }

    pub fn load(&mut self, transport: &impl Transport) -> bool {
        let Some(pending) = self.begin_load() else {
            return false;
        };
        let outcome = transport.execute(pending.request);
        self.complete_load(pending.ticket, outcome)
    }

    pub fn retry_with(&mut self, transport: &impl Transport) -> bool {
        self.load(transport)
    }

    pub fn remove(&mut self, id: RecordId, transport: &impl Transport) -> bool {
        let Some(pending) = self.begin_remove(id) else {
            return false;
        };
        let outcome = transport.execute(pending.request);
        self.complete_remove(pending.ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::RecordedDialogs;
    use crate::http::HttpMethod;
    use crate::types::Company;

    const ANN: &str = r#"{"id":1,"name":"Ann","username":"ann","email":"a@x.com","phone":"","website":"","company":{"name":""}}"#;
    const TWO: &str = r#"[
        {"id":1,"name":"Ann","username":"ann","email":"a@x.com"},
        {"id":2,"name":"Bob","username":"bob","email":"b@x.com"}
    ]"#;

    fn ann() -> Record {
        Record {
            id: 1,
            name: "Ann".to_string(),
            username: "ann".to_string(),
            email: "a@x.com".to_string(),
            phone: String::new(),
            website: String::new(),
            company: Company::default(),
        }
    }

    fn controller(dialogs: &RecordedDialogs) -> ListController<&RecordedDialogs> {
        ListController::new(RecordClient::new("http://svc"), dialogs)
    }

    fn loaded<'a>(dialogs: &'a RecordedDialogs, body: &str) -> ListController<&'a RecordedDialogs> {
        let mut list = controller(dialogs);
        let pending = list.begin_load().unwrap();
        assert!(list.complete_load(pending.ticket, Ok(HttpResponse::new(200, body))));
        list
    }

    #[test]
    fn single_record_fetch_becomes_ready() {
        let dialogs = RecordedDialogs::accepting();
        let list = loaded(&dialogs, &format!("[{ANN}]"));
        assert_eq!(list.state(), &RequestState::Ready(vec![ann()]));
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn begin_load_enters_loading_and_drops_stale_list() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = loaded(&dialogs, TWO);
        let pending = list.begin_load().unwrap();
        assert_eq!(pending.request.method, HttpMethod::Get);
        assert!(list.state().is_loading());
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn failed_load_enters_error_with_message() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = controller(&dialogs);
        let pending = list.begin_load().unwrap();
        list.complete_load(pending.ticket, Err(ApiError::Transport("refused".into())));
        assert_eq!(list.state().error(), Some(LOAD_FAILED));
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn retry_leaves_error() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = controller(&dialogs);
        let pending = list.begin_load().unwrap();
        list.complete_load(pending.ticket, Ok(HttpResponse::new(500, "")));
        assert!(list.state().error().is_some());

        let pending = list.retry().unwrap();
        assert!(list.complete_load(pending.ticket, Ok(HttpResponse::new(200, TWO))));
        assert_eq!(list.count(), 2);
    }

    #[test]
    fn overlapping_loads_apply_exactly_once() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = controller(&dialogs);
        let slow = list.begin_load().unwrap();
        assert!(list.begin_load().is_none(), "second load must be refused while busy");

        assert!(list.complete_load(slow.ticket, Ok(HttpResponse::new(200, TWO))));
        assert!(!list.complete_load(slow.ticket, Ok(HttpResponse::new(200, "[]"))));
        assert_eq!(list.count(), 2);
    }

    #[test]
    fn late_response_for_a_torn_down_view_is_ignored() {
        let dialogs = RecordedDialogs::accepting();
        let mut old_view = controller(&dialogs);
        let slow = old_view.begin_load().unwrap();
        drop(old_view);

        let mut new_view = controller(&dialogs);
        let fast = new_view.begin_load().unwrap();
        assert!(new_view.complete_load(fast.ticket, Ok(HttpResponse::new(200, format!("[{ANN}]")))));
        assert!(!new_view.complete_load(slow.ticket, Ok(HttpResponse::new(200, TWO))));
        assert_eq!(new_view.records(), &[ann()]);
    }

    #[test]
    fn confirmed_delete_removes_exactly_one() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = loaded(&dialogs, TWO);
        let pending = list.begin_remove(1).unwrap();
        assert_eq!(pending.request.method, HttpMethod::Delete);
        assert_eq!(pending.request.path, "http://svc/users/1");
        assert_eq!(list.count(), 2, "no removal before confirmation from the service");

        assert!(list.complete_remove(pending.ticket, Ok(HttpResponse::new(200, "{}"))));
        assert_eq!(list.count(), 1);
        assert!(list.records().iter().all(|r| r.id != 1));
        assert_eq!(dialogs.prompts(), vec!["Are you sure you want to delete Ann?"]);
        assert_eq!(dialogs.notices(), vec!["Ann has been deleted successfully."]);
    }

    #[test]
    fn failed_delete_keeps_ready_list_unchanged() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = loaded(&dialogs, TWO);
        let before = list.state().clone();

        let pending = list.begin_remove(1).unwrap();
        list.complete_remove(pending.ticket, Err(ApiError::Transport("timed out".into())));
        assert_eq!(list.state(), &before);
        assert_eq!(dialogs.notices(), vec![DELETE_FAILED]);
    }

    #[test]
    fn declined_delete_issues_nothing() {
        let dialogs = RecordedDialogs::declining();
        let mut list = loaded(&dialogs, TWO);
        assert!(list.begin_remove(2).is_none());
        assert!(!list.is_busy());
        assert_eq!(list.count(), 2);
        assert!(dialogs.notices().is_empty());
    }

    #[test]
    fn delete_needs_a_ready_list_and_a_known_id() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = controller(&dialogs);
        assert!(list.begin_remove(1).is_none());

        let mut list = loaded(&dialogs, TWO);
        assert!(list.begin_remove(99).is_none());
        assert!(dialogs.prompts().is_empty());
    }

    #[test]
    fn load_while_delete_in_flight_is_refused() {
        let dialogs = RecordedDialogs::accepting();
        let mut list = loaded(&dialogs, TWO);
        let pending = list.begin_remove(2).unwrap();
        assert!(list.begin_load().is_none());
        assert!(!list.complete_load(pending.ticket, Ok(HttpResponse::new(200, "[]"))));
        assert!(list.complete_remove(pending.ticket, Ok(HttpResponse::new(204, ""))));
        assert_eq!(list.records(), &[ann()]);
    }
}

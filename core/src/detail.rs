//! Controller behind the read-only record view.
//!
//! Loading a different id supersedes whatever fetch is outstanding, so a
//! slow answer for the previous id can never land on the new view.

use crate::client::RecordClient;
use crate::error::{ApiError, ErrorKind};
use crate::http::HttpResponse;
use crate::state::{PendingRequest, RequestGuard, RequestState, RequestTicket};
use crate::transport::Transport;
use crate::types::{Record, RecordId};

pub const LOAD_FAILED: &str = "Failed to load user details. Please try again.";

#[derive(Debug)]
pub struct DetailController {
    client: RecordClient,
    id: Option<RecordId>,
    state: RequestState<Record>,
    guard: RequestGuard,
}

impl DetailController {
    pub fn new(client: RecordClient) -> Self {
        Self {
            client,
            id: None,
            state: RequestState::Idle,
            guard: RequestGuard::new(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn state(&self) -> &RequestState<Record> {
        &self.state
    }

    pub fn record(&self) -> Option<&Record> {
        self.state.ready()
    }

    /// Fetch `id`. Refused while the same id is already loading.
    pub fn begin_load(&mut self, id: RecordId) -> Option<PendingRequest> {
        let ticket = if self.guard.is_busy() {
            if self.id == Some(id) {
                return None;
            }
            tracing::debug!(previous = ?self.id, id, "superseding record fetch");
            self.guard.supersede()
        } else {
            self.guard.begin()?
        };
        tracing::debug!(id, "loading record");
        self.id = Some(id);
        self.state = RequestState::Loading;
        Some(PendingRequest {
            ticket,
            request: self.client.build_get_record(id),
        })
    }

    /// Apply the outcome of `begin_load`. Returns whether it was applied.
    pub fn complete_load(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        if !self.guard.finish(ticket) {
            return false;
        }
        match outcome.and_then(|response| self.client.parse_get_record(response)) {
            Ok(record) => {
                tracing::debug!(id = record.id, "record ready");
                self.state = RequestState::Ready(record);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(id = ?self.id, "record not found");
                self.state = RequestState::NotFound;
            }
            Err(e) => {
                tracing::warn!(id = ?self.id, error = %e, "record fetch failed");
                self.state = RequestState::Error(LOAD_FAILED.to_string());
            }
        }
        true
    }

    /// Refetch the current id after a retryable failure.
    pub fn retry(&mut self) -> Option<PendingRequest> {
        match (&self.state, self.id) {
            (RequestState::Error(_), Some(id)) => self.begin_load(id),
            _ => None,
        }
    }

    pub fn load(&mut self, id: RecordId, transport: &impl Transport) -> bool {
        let Some(pending) = self.begin_load(id) else {
            return false;
        };
        let outcome = transport.execute(pending.request);
        self.complete_load(pending.ticket, outcome)
    }
}

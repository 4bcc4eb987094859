//! Controller behind the create and edit forms.
//!
//! # Design
//! The draft exists only once it can be edited: immediately in create mode,
//! after a successful fetch in edit mode. A failed or 404 fetch leaves the
//! form without a draft, so the host shows a load failure instead of an
//! empty form that would overwrite the record on submit.
//!
//! Submission waits for the service. A rejected submit returns to editing
//! with the draft untouched; a successful one ends the form with the record
//! the service sent back.

use crate::client::RecordClient;
use crate::dialogs::Dialogs;
use crate::error::{ApiError, ErrorKind, FormError, ValidationError};
use crate::field::FieldPath;
use crate::http::HttpResponse;
use crate::state::{PendingRequest, RequestGuard, RequestTicket};
use crate::transport::Transport;
use crate::types::{Record, RecordDraft, RecordId};

pub const FETCH_FAILED: &str = "Failed to load user data. Please try again.";
pub const NOT_FOUND: &str = "User not found.";

impl RecordDraft {
    /// Name, username and email must be non-empty. No trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.username.is_empty() || self.email.is_empty() {
            return Err(ValidationError);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

impl FormMode {
    fn verb(self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit(_) => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode only: the record is being fetched.
    Fetching,
    FetchFailed(String),
    /// Edit mode only: the record does not exist.
    NotFound,
    Editing,
    Submitting,
    /// The service accepted the submit. Terminal.
    Submitted(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the host should navigate back to the list.
    Completed(Record),
    /// Rejected; the form is editable again and shows this message.
    Failed(String),
}

#[derive(Debug)]
pub struct FormController<D> {
    client: RecordClient,
    dialogs: D,
    mode: FormMode,
    phase: FormPhase,
    draft: Option<RecordDraft>,
    error: Option<String>,
    guard: RequestGuard,
}

impl<D: Dialogs> FormController<D> {
    pub fn create(client: RecordClient, dialogs: D) -> Self {
        Self {
            client,
            dialogs,
            mode: FormMode::Create,
            phase: FormPhase::Editing,
            draft: Some(RecordDraft::default()),
            error: None,
            guard: RequestGuard::new(),
        }
    }

    /// Start an edit form. Nothing is editable until `begin_fetch` completes.
    pub fn edit(client: RecordClient, dialogs: D, id: RecordId) -> Self {
        Self {
            client,
            dialogs,
            mode: FormMode::Edit(id),
            phase: FormPhase::Fetching,
            draft: None,
            error: None,
            guard: RequestGuard::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn draft(&self) -> Option<&RecordDraft> {
        self.draft.as_ref()
    }

    pub fn is_editable(&self) -> bool {
        self.phase == FormPhase::Editing && self.draft.is_some()
    }

    /// The message the form should show, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::FetchFailed(message) => Some(message.as_str()),
            FormPhase::NotFound => Some(NOT_FOUND),
            _ => self.error.as_deref(),
        }
    }

    pub fn begin_fetch(&mut self) -> Option<PendingRequest> {
        let FormMode::Edit(id) = self.mode else {
            return None;
        };
        if !matches!(self.phase, FormPhase::Fetching | FormPhase::FetchFailed(_)) {
            return None;
        }
        let ticket = self.guard.begin()?;
        tracing::debug!(id, "fetching record for edit");
        self.phase = FormPhase::Fetching;
        Some(PendingRequest {
            ticket,
            request: self.client.build_get_record(id),
        })
    }

    /// Apply the outcome of `begin_fetch`. Returns whether it was applied.
    pub fn complete_fetch(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        if self.phase != FormPhase::Fetching || !self.guard.finish(ticket) {
            return false;
        }
        match outcome.and_then(|response| self.client.parse_get_record(response)) {
            Ok(record) => {
                tracing::debug!(id = record.id, "edit draft populated");
                self.draft = Some(RecordDraft::from(&record));
                self.phase = FormPhase::Editing;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(mode = ?self.mode, "record to edit not found");
                self.phase = FormPhase::NotFound;
            }
            Err(e) => {
                tracing::warn!(mode = ?self.mode, error = %e, "record fetch for edit failed");
                self.phase = FormPhase::FetchFailed(FETCH_FAILED.to_string());
            }
        }
        true
    }

    pub fn retry_fetch(&mut self) -> Option<PendingRequest> {
        match self.phase {
            FormPhase::FetchFailed(_) => self.begin_fetch(),
            _ => None,
        }
    }

    /// Replace the leaf at `path`, keeping every other field.
    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), FormError> {
        if self.phase != FormPhase::Editing {
            return Err(FormError::NotEditable);
        }
        let draft = self.draft.as_ref().ok_or(FormError::NotEditable)?;
        self.draft = Some(draft.with_field(path, value));
        Ok(())
    }

    /// `NotEditable` until there is a draft to check.
    pub fn validate(&self) -> Result<(), FormError> {
        let draft = self.draft.as_ref().ok_or(FormError::NotEditable)?;
        Ok(draft.validate()?)
    }

    /// Validate and issue the create or update. A validation failure is
    /// recorded as the form error and nothing is issued.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if !self.is_editable() || self.guard.is_busy() {
            return None;
        }
        self.error = None;
        let draft = self.draft.as_ref()?;
        if let Err(e) = draft.validate() {
            tracing::debug!("submit blocked by validation");
            self.error = Some(e.to_string());
            return None;
        }
        let built = match self.mode {
            FormMode::Create => self.client.build_create_record(draft),
            FormMode::Edit(id) => self.client.build_update_record(id, draft),
        };
        let request = match built {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "could not encode draft");
                self.error = Some(self.failure_message());
                return None;
            }
        };
        let ticket = self.guard.begin()?;
        tracing::debug!(mode = ?self.mode, "submitting draft");
        self.phase = FormPhase::Submitting;
        Some(PendingRequest { ticket, request })
    }

    /// Apply the outcome of `begin_submit`. `None` means the outcome was
    /// stale and nothing changed.
    pub fn complete_submit(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Option<SubmitOutcome> {
        if self.phase != FormPhase::Submitting || !self.guard.finish(ticket) {
            return None;
        }
        let parsed = outcome.and_then(|response| match self.mode {
            FormMode::Create => self.client.parse_create_record(response),
            FormMode::Edit(_) => self.client.parse_update_record(response),
        });
        match parsed {
            Ok(record) => {
                tracing::debug!(id = record.id, mode = ?self.mode, "draft saved");
                self.dialogs
                    .notify(&format!("User \"{}\" {}d successfully!", record.name, self.mode.verb()));
                self.phase = FormPhase::Submitted(record.clone());
                Some(SubmitOutcome::Completed(record))
            }
            Err(e) => {
                tracing::warn!(mode = ?self.mode, error = %e, "submit failed");
                let message = self.failure_message();
                self.error = Some(message.clone());
                self.phase = FormPhase::Editing;
                Some(SubmitOutcome::Failed(message))
            }
        }
    }

    fn failure_message(&self) -> String {
        format!("Failed to {} user. Please try again.", self.mode.verb())
    }

    pub fn fetch(&mut self, transport: &impl Transport) -> bool {
        let Some(pending) = self.begin_fetch() else {
            return false;
        };
        let outcome = transport.execute(pending.request);
        self.complete_fetch(pending.ticket, outcome)
    }

    /// Validate, submit and apply the result in one go. `None` when nothing
    /// was sent (validation failed, not editable, or busy).
    pub fn submit(&mut self, transport: &impl Transport) -> Option<SubmitOutcome> {
        let pending = self.begin_submit()?;
        let outcome = transport.execute(pending.request);
        self.complete_submit(pending.ticket, outcome)
    }
}

//! Request lifecycle shared by every controller.
//!
//! # Design
//! A controller never performs I/O itself. `begin_*` hands the caller a
//! `PendingRequest`; the caller executes it and brings the outcome back to
//! `complete_*` together with the ticket. `RequestGuard` keeps at most one
//! ticket current per controller instance, so a second `begin_*` while busy
//! is refused and a late answer to a superseded or foreign request is
//! discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::http::HttpRequest;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a controller's last requested operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(String),
    /// The requested record does not exist. Terminal for that id.
    NotFound,
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

/// Identifies one outstanding remote call of one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    owner: u64,
    seq: u64,
}

/// A request the caller must execute and report back with its ticket.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: HttpRequest,
}

/// Single-flight bookkeeping for one controller instance.
#[derive(Debug)]
pub(crate) struct RequestGuard {
    owner: u64,
    seq: u64,
    current: Option<RequestTicket>,
}

impl RequestGuard {
    pub(crate) fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            seq: 0,
            current: None,
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// A new ticket, or `None` while another call is outstanding.
    pub(crate) fn begin(&mut self) -> Option<RequestTicket> {
        if self.is_busy() {
            return None;
        }
        Some(self.supersede())
    }

    /// A new ticket that replaces any outstanding one.
    pub(crate) fn supersede(&mut self) -> RequestTicket {
        self.seq += 1;
        let ticket = RequestTicket {
            owner: self.owner,
            seq: self.seq,
        };
        self.current = Some(ticket);
        ticket
    }

    /// Consume `ticket` if it is the outstanding one.
    pub(crate) fn finish(&mut self, ticket: RequestTicket) -> bool {
        if self.current == Some(ticket) {
            self.current = None;
            true
        } else {
            tracing::warn!(owner = ticket.owner, seq = ticket.seq, "discarding stale response");
            false
        }
    }
}

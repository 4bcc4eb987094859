//! Resource state controllers for the user directory.
//!
//! # Overview
//! Mediates between the remote `/users` record service and the list,
//! detail and form views. Requests are built and responses parsed as plain
//! data (`RecordClient`); a `Transport` performs the round-trip; the
//! controllers own each view's state and decide what a response means.
//!
//! # Design
//! - `RecordClient` is stateless and holds only `base_url`.
//! - Controllers split every remote call into `begin_*`, which returns a
//!   `PendingRequest`, and `complete_*`, which applies the outcome. One call
//!   may be outstanding per controller; stale outcomes are discarded.
//! - The blocking `load`/`remove`/`fetch`/`submit` helpers run both halves
//!   over any `Transport`.
//! - Operator confirmation and notices go through the injected `Dialogs`.

pub mod client;
pub mod config;
pub mod detail;
pub mod dialogs;
pub mod error;
pub mod field;
pub mod form;
pub mod http;
pub mod list;
pub mod route;
pub mod state;
pub mod transport;
pub mod types;

pub use client::RecordClient;
pub use config::ServiceConfig;
pub use detail::DetailController;
pub use dialogs::{Dialogs, RecordedDialogs};
pub use error::{ApiError, ConfigError, ErrorKind, FieldPathError, FormError, RouteError, ValidationError};
pub use field::{ChildField, FieldPath, ParentField, TopField};
pub use form::{FormController, FormMode, FormPhase, SubmitOutcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::ListController;
pub use route::Route;
pub use state::{PendingRequest, RequestState, RequestTicket};
pub use transport::{RecordService, Transport, UreqTransport};
pub use types::{Company, Record, RecordDraft, RecordId};

//! Executing requests against the record service.
//!
//! # Design
//! `Transport` is the single seam where I/O happens. A non-2xx status is
//! still a response and is returned as data; only a request that produced
//! no response at all (connect failure, timeout) is an `ApiError::Transport`.
//! `RecordService` pairs a `RecordClient` with a transport to offer the five
//! remote operations as plain blocking calls.

use std::time::Duration;

use crate::client::RecordClient;
use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Record, RecordDraft, RecordId};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking HTTP transport with a fixed per-request timeout.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").field("timeout", &self.timeout).finish()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&path), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&path), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(&path), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(&path), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(%method, %path, status, "response received");
        Ok(HttpResponse { status, headers, body })
    }
}

/// The five remote operations over a concrete transport. Each call is a
/// single round-trip with no retry and no caching.
#[derive(Debug, Clone)]
pub struct RecordService<T> {
    client: RecordClient,
    transport: T,
}

impl RecordService<UreqTransport> {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(RecordClient::new(&config.base_url), UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> RecordService<T> {
    pub fn new(client: RecordClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RecordClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_records(&self) -> Result<Vec<Record>, ApiError> {
        let response = self.transport.execute(self.client.build_list_records())?;
        self.client.parse_list_records(response)
    }

    pub fn get_record(&self, id: RecordId) -> Result<Record, ApiError> {
        let response = self.transport.execute(self.client.build_get_record(id))?;
        self.client.parse_get_record(response)
    }

    pub fn create_record(&self, draft: &RecordDraft) -> Result<Record, ApiError> {
        let response = self.transport.execute(self.client.build_create_record(draft)?)?;
        self.client.parse_create_record(response)
    }

    pub fn update_record(&self, id: RecordId, draft: &RecordDraft) -> Result<Record, ApiError> {
        let response = self.transport.execute(self.client.build_update_record(id, draft)?)?;
        self.client.parse_update_record(response)
    }

    pub fn delete_record(&self, id: RecordId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_record(id))?;
        self.client.parse_delete_record(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Replays canned responses and records the requests it saw.
    struct Scripted {
        responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses.borrow_mut().remove(0)
        }
    }

    fn service(responses: Vec<Result<HttpResponse, ApiError>>) -> RecordService<Scripted> {
        RecordService::new(RecordClient::new("http://svc"), Scripted::new(responses))
    }

    #[test]
    fn list_records_issues_one_get() {
        let svc = service(vec![Ok(HttpResponse::new(200, "[]"))]);
        assert!(svc.list_records().unwrap().is_empty());
        let seen = svc.transport().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "http://svc/users");
    }

    #[test]
    fn get_record_maps_404_to_not_found() {
        let svc = service(vec![Ok(HttpResponse::new(404, "{}"))]);
        assert_eq!(svc.get_record(999).unwrap_err(), ApiError::NotFound);
    }

    #[test]
    fn transport_failure_surfaces_unchanged() {
        let svc = service(vec![Err(ApiError::Transport("timed out".into()))]);
        assert_eq!(
            svc.delete_record(1).unwrap_err(),
            ApiError::Transport("timed out".into())
        );
    }

    #[test]
    fn create_record_returns_server_assigned_id() {
        let svc = service(vec![Ok(HttpResponse::new(201, r#"{"id":11,"name":"Bob"}"#))]);
        let record = svc.create_record(&RecordDraft::default()).unwrap();
        assert_eq!(record.id, 11);
        assert_eq!(svc.transport().seen.borrow()[0].method, HttpMethod::Post);
    }
}

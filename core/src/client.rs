//! Stateless request builder and response parser for the `/users` API.
//!
//! # Design
//! `RecordClient` holds only a `base_url`. Each operation is a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming the
//! `HttpResponse`; the round-trip in between belongs to a `Transport`.
//! Create and delete accept either of the success statuses real services
//! use for them (201/200 and 204/200).

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Record, RecordDraft, RecordId};

#[derive(Debug, Clone)]
pub struct RecordClient {
    base_url: String,
}

impl RecordClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_records(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/users", self.base_url))
    }

    pub fn build_get_record(&self, id: RecordId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/users/{id}", self.base_url))
    }

    pub fn build_create_record(&self, draft: &RecordDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.json(HttpMethod::Post, format!("{}/users", self.base_url), body))
    }

    /// The update body is the full record, id included.
    pub fn build_update_record(&self, id: RecordId, draft: &RecordDraft) -> Result<HttpRequest, ApiError> {
        let record = Record::from_draft(id, draft.clone());
        let body = serde_json::to_string(&record).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.json(HttpMethod::Put, format!("{}/users/{id}", self.base_url), body))
    }

    pub fn build_delete_record(&self, id: RecordId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{}/users/{id}", self.base_url))
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_get_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_create_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response.body)
    }

    pub fn parse_update_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_delete_record(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(&self, method: HttpMethod, path: String, body: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

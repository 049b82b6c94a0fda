//! Stateless HTTP request builder and response parser for the errand API.
//!
//! # Design
//! `ErrandClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller (a `Transport`) executes the actual HTTP round-trip, keeping the
//! core deterministic and free of I/O dependencies.
//!
//! Every `parse_*` decodes the response envelope exactly once and returns
//! `Result<T, ApiError>`; nothing downstream inspects `success` again.

use serde::de::IgnoredAny;
use serde::Serialize;
use url::Url;

use crate::envelope::{decode, decode_data};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Account, AccountPatch, DashboardStats, Errand, ErrandPatch, NewAccount, NewErrand,
};

const USERS: &str = "/users";
const ERRANDS: &str = "/errands";
const DASHBOARD_STATS: &str = "/dashboard/stats";
const RECENT_ERRANDS: &str = "/dashboard/recent-errands";

/// Synchronous, stateless client for the errand API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrandClient {
    base_url: String,
}

impl ErrandClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `{base}{path}/{id}` with `id` percent-encoded as one path segment.
    fn item(&self, path: &str, id: &str) -> Result<String, ApiError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::InvalidUrl(format!("`{id}` is not a valid id")));
        }
        let mut url =
            Url::parse(&self.collection(path)).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .push(id);
        Ok(url.into())
    }

    fn json<B: Serialize>(&self, method: HttpMethod, url: String, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::with_json(method, url, body))
    }

    // -- accounts ----------------------------------------------------------

    pub fn build_list_accounts(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.collection(USERS))
    }

    pub fn build_get_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::without_body(HttpMethod::Get, self.item(USERS, id)?))
    }

    pub fn build_create_account(&self, input: &NewAccount) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, self.collection(USERS), input)
    }

    pub fn build_update_account(&self, id: &str, patch: &AccountPatch) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, self.item(USERS, id)?, patch)
    }

    pub fn build_delete_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::without_body(HttpMethod::Delete, self.item(USERS, id)?))
    }

    pub fn parse_list_accounts(&self, response: HttpResponse) -> Result<Vec<Account>, ApiError> {
        decode_data(&response)
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        decode_data(&response)
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        decode_data(&response)
    }

    pub fn parse_update_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        decode_data(&response)
    }

    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<(), ApiError> {
        decode::<IgnoredAny>(&response).map(|_| ())
    }

    // -- errands -----------------------------------------------------------

    pub fn build_list_errands(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.collection(ERRANDS))
    }

    pub fn build_get_errand(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::without_body(HttpMethod::Get, self.item(ERRANDS, id)?))
    }

    pub fn build_create_errand(&self, input: &NewErrand) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, self.collection(ERRANDS), input)
    }

    pub fn build_update_errand(&self, id: &str, patch: &ErrandPatch) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, self.item(ERRANDS, id)?, patch)
    }

    pub fn build_delete_errand(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::without_body(HttpMethod::Delete, self.item(ERRANDS, id)?))
    }

    pub fn parse_list_errands(&self, response: HttpResponse) -> Result<Vec<Errand>, ApiError> {
        decode_data(&response)
    }

    pub fn parse_get_errand(&self, response: HttpResponse) -> Result<Errand, ApiError> {
        decode_data(&response)
    }

    pub fn parse_create_errand(&self, response: HttpResponse) -> Result<Errand, ApiError> {
        decode_data(&response)
    }

    pub fn parse_update_errand(&self, response: HttpResponse) -> Result<Errand, ApiError> {
        decode_data(&response)
    }

    pub fn parse_delete_errand(&self, response: HttpResponse) -> Result<(), ApiError> {
        decode::<IgnoredAny>(&response).map(|_| ())
    }

    // -- dashboard ---------------------------------------------------------

    pub fn build_dashboard_stats(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.collection(DASHBOARD_STATS))
    }

    pub fn build_recent_errands(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.collection(RECENT_ERRANDS))
    }

    pub fn parse_dashboard_stats(&self, response: HttpResponse) -> Result<DashboardStats, ApiError> {
        decode_data(&response)
    }

    pub fn parse_recent_errands(&self, response: HttpResponse) -> Result<Vec<Errand>, ApiError> {
        decode_data(&response)
    }
}

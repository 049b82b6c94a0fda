//! Resource services: one per entity, one HTTP call per operation.
//!
//! # Design
//! A service pairs the stateless `ErrandClient` with a shared `Transport`.
//! Each method builds a request, hands it to the transport, parses the
//! response and classifies a rejection into a `ServiceError` carrying either
//! the server's message or a fixed per-operation fallback. Services are
//! plain values built once by `Services::new` and passed to whoever needs
//! them; nothing here is global.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::client::ErrandClient;
use crate::error::{ApiError, ServiceError};
use crate::http::{HttpRequest, HttpResponse};
use crate::source::{CrudSource, ListSource, ValueSource};
use crate::transport::Transport;
use crate::types::{
    Account, AccountPatch, DashboardStats, Errand, ErrandPatch, NewAccount, NewErrand,
};

async fn round_trip<T, R>(
    transport: &T,
    request: HttpRequest,
    parse: impl FnOnce(HttpResponse) -> Result<R, ApiError>,
) -> Result<R, ApiError>
where
    T: Transport + ?Sized,
{
    debug!(method = %request.method, url = %request.url, "sending request");
    let response = transport.execute(request).await?;
    debug!(status = response.status, "received response");
    parse(response)
}

/// Turn a rejection into `kind(message)`, falling back to `fallback` when
/// the server sent no (or an empty) message.
fn classify(err: ApiError, fallback: &str, kind: fn(String) -> ServiceError) -> ServiceError {
    match err {
        ApiError::Rejected { message, .. } => kind(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        ),
        other => ServiceError::Transport(other),
    }
}

/// Every service the admin client talks to, sharing one transport.
pub struct Services<T: Transport + ?Sized> {
    pub accounts: AccountService<T>,
    pub errands: ErrandService<T>,
    pub dashboard: DashboardService<T>,
}

impl<T: Transport + ?Sized> Services<T> {
    pub fn new(base_url: &str, transport: Arc<T>) -> Self {
        let client = ErrandClient::new(base_url);
        Self {
            accounts: AccountService::new(client.clone(), Arc::clone(&transport)),
            errands: ErrandService::new(client.clone(), Arc::clone(&transport)),
            dashboard: DashboardService::new(client, transport),
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub struct AccountService<T: Transport + ?Sized> {
    client: ErrandClient,
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> Clone for AccountService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + ?Sized> AccountService<T> {
    pub fn new(client: ErrandClient, transport: Arc<T>) -> Self {
        Self { client, transport }
    }

    pub async fn list(&self) -> Result<Vec<Account>, ServiceError> {
        let request = self.client.build_list_accounts();
        round_trip(&*self.transport, request, |r| self.client.parse_list_accounts(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch users", ServiceError::Rejected))
    }

    pub async fn get(&self, id: &str) -> Result<Account, ServiceError> {
        let request = self.client.build_get_account(id)?;
        round_trip(&*self.transport, request, |r| self.client.parse_get_account(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch user", ServiceError::NotFound))
    }

    pub async fn create(&self, input: &NewAccount) -> Result<Account, ServiceError> {
        let request = self.client.build_create_account(input)?;
        round_trip(&*self.transport, request, |r| self.client.parse_create_account(r))
            .await
            .map_err(|e| classify(e, "Failed to create user", ServiceError::Validation))
    }

    pub async fn update(&self, id: &str, patch: &AccountPatch) -> Result<Account, ServiceError> {
        let request = self.client.build_update_account(id, patch)?;
        round_trip(&*self.transport, request, |r| self.client.parse_update_account(r))
            .await
            .map_err(|e| classify(e, "Failed to update user", ServiceError::Rejected))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let request = self.client.build_delete_account(id)?;
        round_trip(&*self.transport, request, |r| self.client.parse_delete_account(r))
            .await
            .map_err(|e| classify(e, "Failed to delete user", ServiceError::Rejected))
    }
}

#[async_trait]
impl<T: Transport + ?Sized> ListSource for AccountService<T> {
    type Item = Account;

    async fn list(&self) -> Result<Vec<Account>, ServiceError> {
        AccountService::list(self).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> CrudSource for AccountService<T> {
    type Draft = NewAccount;
    type Patch = AccountPatch;

    async fn create(&self, draft: &NewAccount) -> Result<Account, ServiceError> {
        AccountService::create(self, draft).await
    }

    async fn update(&self, id: &str, patch: &AccountPatch) -> Result<Account, ServiceError> {
        AccountService::update(self, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        AccountService::delete(self, id).await
    }
}

// ---------------------------------------------------------------------------
// Errands
// ---------------------------------------------------------------------------

pub struct ErrandService<T: Transport + ?Sized> {
    client: ErrandClient,
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> Clone for ErrandService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + ?Sized> ErrandService<T> {
    pub fn new(client: ErrandClient, transport: Arc<T>) -> Self {
        Self { client, transport }
    }

    pub async fn list(&self) -> Result<Vec<Errand>, ServiceError> {
        let request = self.client.build_list_errands();
        round_trip(&*self.transport, request, |r| self.client.parse_list_errands(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch errands", ServiceError::Rejected))
    }

    pub async fn get(&self, id: &str) -> Result<Errand, ServiceError> {
        let request = self.client.build_get_errand(id)?;
        round_trip(&*self.transport, request, |r| self.client.parse_get_errand(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch errand", ServiceError::NotFound))
    }

    pub async fn create(&self, input: &NewErrand) -> Result<Errand, ServiceError> {
        let request = self.client.build_create_errand(input)?;
        round_trip(&*self.transport, request, |r| self.client.parse_create_errand(r))
            .await
            .map_err(|e| classify(e, "Failed to create errand", ServiceError::Validation))
    }

    pub async fn update(&self, id: &str, patch: &ErrandPatch) -> Result<Errand, ServiceError> {
        let request = self.client.build_update_errand(id, patch)?;
        round_trip(&*self.transport, request, |r| self.client.parse_update_errand(r))
            .await
            .map_err(|e| classify(e, "Failed to update errand", ServiceError::Rejected))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let request = self.client.build_delete_errand(id)?;
        round_trip(&*self.transport, request, |r| self.client.parse_delete_errand(r))
            .await
            .map_err(|e| classify(e, "Failed to delete errand", ServiceError::Rejected))
    }
}

#[async_trait]
impl<T: Transport + ?Sized> ListSource for ErrandService<T> {
    type Item = Errand;

    async fn list(&self) -> Result<Vec<Errand>, ServiceError> {
        ErrandService::list(self).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> CrudSource for ErrandService<T> {
    type Draft = NewErrand;
    type Patch = ErrandPatch;

    async fn create(&self, draft: &NewErrand) -> Result<Errand, ServiceError> {
        ErrandService::create(self, draft).await
    }

    async fn update(&self, id: &str, patch: &ErrandPatch) -> Result<Errand, ServiceError> {
        ErrandService::update(self, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        ErrandService::delete(self, id).await
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct DashboardService<T: Transport + ?Sized> {
    client: ErrandClient,
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> Clone for DashboardService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + ?Sized> DashboardService<T> {
    pub fn new(client: ErrandClient, transport: Arc<T>) -> Self {
        Self { client, transport }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let request = self.client.build_dashboard_stats();
        round_trip(&*self.transport, request, |r| self.client.parse_dashboard_stats(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch dashboard stats", ServiceError::Rejected))
    }

    pub async fn recent_errands(&self) -> Result<Vec<Errand>, ServiceError> {
        let request = self.client.build_recent_errands();
        round_trip(&*self.transport, request, |r| self.client.parse_recent_errands(r))
            .await
            .map_err(|e| classify(e, "Failed to fetch recent errands", ServiceError::Rejected))
    }

    /// View the recent-errands feed as a read-only list source.
    pub fn recent(&self) -> RecentErrands<T> {
        RecentErrands(self.clone())
    }
}

#[async_trait]
impl<T: Transport + ?Sized> ValueSource for DashboardService<T> {
    type Value = DashboardStats;

    async fn fetch(&self) -> Result<DashboardStats, ServiceError> {
        self.stats().await
    }
}

/// The dashboard's recent-errands feed as a `ListSource`.
pub struct RecentErrands<T: Transport + ?Sized>(DashboardService<T>);

#[async_trait]
impl<T: Transport + ?Sized> ListSource for RecentErrands<T> {
    type Item = Errand;

    async fn list(&self) -> Result<Vec<Errand>, ServiceError> {
        self.0.recent_errands().await
    }
}

//! Client core for the errand marketplace admin API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host-supplied `Transport`
//! performs the round-trip; on top of that sit one service per resource and
//! the stores that keep local collections in step with the remote API.
//!
//! # Design
//! - `ErrandClient` is stateless and holds only `base_url`. Each operation is
//!   split into `build_*` and `parse_*` so the I/O boundary is explicit.
//! - Response envelopes are decoded once, in `parse_*`, into
//!   `Result<T, ApiError>`.
//! - `Services` bundles the resource services around one shared transport
//!   and is constructed explicitly by the host.
//! - `ListStore` / `ValueStore` own the fetched state and guard it against
//!   stale and post-close writes.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod http;
pub mod service;
pub mod source;
pub mod store;
pub mod transport;
pub mod types;

pub use client::ErrandClient;
pub use envelope::Envelope;
pub use error::{ApiError, ServiceError};
pub use filter::{AccountFilter, Activity, ErrandFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{AccountService, DashboardService, ErrandService, RecentErrands, Services};
pub use source::{CrudSource, ListSource, ValueSource};
pub use store::{ListSnapshot, ListStore, Phase, ValueStore};
pub use transport::Transport;
pub use types::{
    Account, AccountPatch, DashboardStats, Errand, ErrandPatch, ErrandStatus, Identified,
    NewAccount, NewErrand, ParseTagError, Role,
};

//! Domain DTOs for the errand API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. Field names
//! are camelCase on the wire. Drafts omit the server-assigned id and
//! timestamps, patches make every field optional and skip absent ones so the
//! server only merges what was sent.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Records that live in a list store and are matched by id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// An unrecognised role, status or activity tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseTagError {
    kind: &'static str,
    value: String,
}

impl ParseTagError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Which side of the marketplace an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Posts errands. `client` on the wire.
    #[serde(rename = "client")]
    Requester,
    /// Runs errands. `worker` on the wire.
    #[serde(rename = "worker")]
    Fulfiller,
}

impl Role {
    pub fn as_tag(self) -> &'static str {
        match self {
            Role::Requester => "client",
            Role::Fulfiller => "worker",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Requester => "Requester",
            Role::Fulfiller => "Fulfiller",
        }
    }
}

impl FromStr for Role {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" | "requester" => Ok(Role::Requester),
            "worker" | "fulfiller" => Ok(Role::Fulfiller),
            _ => Err(ParseTagError::new("role", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A marketplace user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AccountPatch {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Errands
// ---------------------------------------------------------------------------

/// Lifecycle of an errand. Ordered as listed; any value may be set to any
/// other by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrandStatus {
    Waiting,
    InProgress,
    Completed,
    Cancelled,
}

impl ErrandStatus {
    pub const ALL: [ErrandStatus; 4] = [
        ErrandStatus::Waiting,
        ErrandStatus::InProgress,
        ErrandStatus::Completed,
        ErrandStatus::Cancelled,
    ];

    pub fn as_tag(self) -> &'static str {
        match self {
            ErrandStatus::Waiting => "waiting",
            ErrandStatus::InProgress => "in_progress",
            ErrandStatus::Completed => "completed",
            ErrandStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrandStatus::Waiting => "Waiting",
            ErrandStatus::InProgress => "In progress",
            ErrandStatus::Completed => "Completed",
            ErrandStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for ErrandStatus {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        ErrandStatus::ALL
            .into_iter()
            .find(|status| status.as_tag() == normalized)
            .ok_or_else(|| ParseTagError::new("status", s))
    }
}

impl fmt::Display for ErrandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A unit of requested work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Errand {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client_id: String,
    pub client_name: String,
    /// Present only once a fulfiller has been assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    pub status: ErrandStatus,
    /// Whole currency units.
    pub fee: u64,
    pub location: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Errand {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating an errand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewErrand {
    pub title: String,
    pub description: String,
    pub client_id: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    pub status: ErrandStatus,
    pub fee: u64,
    pub location: String,
    pub due_date: DateTime<Utc>,
}

/// Partial update for an errand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ErrandStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl ErrandPatch {
    pub fn status(status: ErrandStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Read-only aggregate snapshot. Growth values are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_errands: u64,
    pub in_progress_errands: u64,
    pub completed_errands: u64,
    pub total_revenue: u64,
    pub user_growth: f64,
    pub errand_growth: f64,
    pub revenue_growth: f64,
}

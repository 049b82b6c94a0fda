//! Search and filter predicates over already-fetched collections.
//!
//! Pure functions of a store snapshot plus UI-only filter state. Matching is
//! a case-insensitive substring test; results keep the input order.

use std::fmt;
use std::str::FromStr;

use crate::types::{Account, Errand, ErrandStatus, ParseTagError, Role};

/// Whether an account may currently use the marketplace, derived from
/// `Account::is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

impl Activity {
    pub fn of(account: &Account) -> Self {
        if account.is_active {
            Activity::Active
        } else {
            Activity::Inactive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::Active => "Active",
            Activity::Inactive => "Inactive",
        }
    }
}

impl FromStr for Activity {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Activity::Active),
            "inactive" => Ok(Activity::Inactive),
            _ => Err(ParseTagError::new("activity", s)),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    /// Matched against name and email.
    pub search: String,
    pub role: Option<Role>,
    pub activity: Option<Activity>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        let needle = self.search.to_lowercase();
        let search_hit = contains_folded(&account.name, &needle)
            || contains_folded(&account.email, &needle);
        search_hit
            && self.role.map_or(true, |role| account.role == role)
            && self.activity.map_or(true, |activity| Activity::of(account) == activity)
    }

    pub fn apply<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        accounts.iter().filter(|a| self.matches(a)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrandFilter {
    /// Matched against title, client name and location.
    pub search: String,
    pub status: Option<ErrandStatus>,
}

impl ErrandFilter {
    pub fn matches(&self, errand: &Errand) -> bool {
        let needle = self.search.to_lowercase();
        let search_hit = contains_folded(&errand.title, &needle)
            || contains_folded(&errand.client_name, &needle)
            || contains_folded(&errand.location, &needle);
        search_hit && self.status.map_or(true, |status| errand.status == status)
    }

    pub fn apply<'a>(&self, errands: &'a [Errand]) -> Vec<&'a Errand> {
        errands.iter().filter(|e| self.matches(e)).collect()
    }
}

//! Traits the stores use to reach a resource service.
//!
//! The stores only ever see these traits, so tests can hand them scripted
//! doubles instead of a service backed by a real `Transport`.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::Identified;

/// Anything that can produce the full, ordered collection of a resource.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Identified + Clone + Send + Sync + 'static;

    async fn list(&self) -> Result<Vec<Self::Item>, ServiceError>;
}

/// A list source that also accepts mutations.
#[async_trait]
pub trait CrudSource: ListSource {
    type Draft: Send + Sync;
    type Patch: Send + Sync;

    async fn create(&self, draft: &Self::Draft) -> Result<Self::Item, ServiceError>;
    async fn update(&self, id: &str, patch: &Self::Patch) -> Result<Self::Item, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// A single read-only value without identity, such as dashboard aggregates.
#[async_trait]
pub trait ValueSource: Send + Sync {
    type Value: Clone + Send + Sync + 'static;

    async fn fetch(&self) -> Result<Self::Value, ServiceError>;
}

//! In-memory stores that keep a local copy of a remote resource.
//!
//! # Design
//! `ListStore` owns an ordered collection plus `phase` and `error`, and
//! changes them only in response to results from its source:
//!
//! - `refetch` drives `Loading -> Ready | Errored`. Success replaces the whole
//!   collection and clears the error; failure keeps the old collection.
//! - `create`, `update` and `delete` are pessimistic. Nothing changes locally
//!   until the source confirms, and the phase is never touched. A failure is
//!   recorded in the shared error field and returned to the caller.
//!
//! Results can arrive out of order, so every write is checked before it is
//! applied. Each `refetch` takes a new generation and only the latest one may
//! land. Each confirmed mutation bumps `version`, and the items of a fetch
//! issued before that bump are a stale write that is dropped; the fetch still
//! succeeded, so the store becomes `Ready` with its error cleared. After
//! `close` no result touches the state at all.
//!
//! The state lock is a plain `std::sync::Mutex` and is never held across an
//! `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::source::{CrudSource, ListSource, ValueSource};
use crate::types::Identified;

/// Fetch lifecycle of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but never fetched.
    Idle,
    Loading,
    Ready,
    /// The latest fetch failed.
    Errored,
}

/// Point-in-time copy of a `ListStore`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub phase: Phase,
    pub error: Option<String>,
    pub version: u64,
}

struct ListState<T> {
    items: Vec<T>,
    phase: Phase,
    error: Option<String>,
    version: u64,
    generation: u64,
    closed: bool,
}

/// Ordered local collection of one resource kept in step with its source.
pub struct ListStore<S: ListSource> {
    source: S,
    state: Mutex<ListState<S::Item>>,
}

impl<S: ListSource> ListStore<S> {
    /// An idle store. Nothing is fetched until `refetch`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(ListState {
                items: Vec::new(),
                phase: Phase::Idle,
                error: None,
                version: 0,
                generation: 0,
                closed: false,
            }),
        }
    }

    /// A store that has already run its first fetch.
    ///
    /// A failed first fetch still yields a store; it is `Errored` with an
    /// empty collection.
    pub async fn mount(source: S) -> Self {
        let store = Self::new(source);
        // Recorded in the store's error field.
        let _ = store.refetch().await;
        store
    }

    fn state(&self) -> MutexGuard<'_, ListState<S::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reload the whole collection from the source.
    pub async fn refetch(&self) -> Result<(), ServiceError> {
        let (generation, version) = {
            let mut state = self.state();
            state.generation += 1;
            if !state.closed {
                state.phase = Phase::Loading;
            }
            (state.generation, state.version)
        };

        let result = self.source.list().await;

        let mut state = self.state();
        if state.closed {
            debug!("store closed, dropping fetch result");
            return result.map(drop);
        }
        if state.generation != generation {
            debug!(generation, latest = state.generation, "fetch superseded, dropping result");
            return result.map(drop);
        }
        match result {
            Ok(_) if state.version != version => {
                warn!(
                    issued_at = version,
                    current = state.version,
                    "collection changed while fetching, rejecting stale fetch"
                );
                // The source answered, so the store is Ready; its items stay
                // as the confirmed mutations left them.
                state.error = None;
                state.phase = Phase::Ready;
                Ok(())
            }
            Ok(items) => {
                debug!(count = items.len(), "fetch succeeded");
                state.items = items;
                state.error = None;
                state.phase = Phase::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "fetch failed");
                state.error = Some(err.to_string());
                state.phase = Phase::Errored;
                Err(err)
            }
        }
    }

    /// Stop applying results. In-flight calls still complete and return
    /// their outcome to the caller.
    pub fn close(&self) {
        self.state().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        let state = self.state();
        ListSnapshot {
            items: state.items.clone(),
            phase: state.phase,
            error: state.error.clone(),
            version: state.version,
        }
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.state().items.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<S::Item> {
        self.state().items.iter().find(|item| item.id() == id).cloned()
    }

    fn record_failure(&self, op: &'static str, err: &ServiceError) {
        warn!(op, error = %err, "mutation failed");
        let mut state = self.state();
        if !state.closed {
            state.error = Some(err.to_string());
        }
    }

    /// Apply a confirmed mutation unless the store has been closed.
    fn apply(&self, op: &'static str, mutate: impl FnOnce(&mut Vec<S::Item>)) {
        let mut state = self.state();
        if state.closed {
            debug!(op, "store closed, dropping mutation result");
            return;
        }
        mutate(&mut state.items);
        state.version += 1;
    }
}

impl<S: CrudSource> ListStore<S> {
    /// Create remotely, then append the confirmed entity at the tail.
    pub async fn create(&self, draft: &S::Draft) -> Result<S::Item, ServiceError> {
        match self.source.create(draft).await {
            Ok(created) => {
                let item = created.clone();
                self.apply("create", move |items| {
                    items.retain(|existing| existing.id() != item.id());
                    items.push(item);
                });
                Ok(created)
            }
            Err(err) => {
                self.record_failure("create", &err);
                Err(err)
            }
        }
    }

    /// Update remotely, then replace the local entity in place.
    pub async fn update(&self, id: &str, patch: &S::Patch) -> Result<S::Item, ServiceError> {
        match self.source.update(id, patch).await {
            Ok(updated) => {
                let item = updated.clone();
                self.apply("update", move |items| {
                    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == id) {
                        *slot = item;
                    }
                });
                Ok(updated)
            }
            Err(err) => {
                self.record_failure("update", &err);
                Err(err)
            }
        }
    }

    /// Delete remotely, then drop the local entity.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        match self.source.delete(id).await {
            Ok(()) => {
                self.apply("delete", |items| items.retain(|existing| existing.id() != id));
                Ok(())
            }
            Err(err) => {
                self.record_failure("delete", &err);
                Err(err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Single values
// ---------------------------------------------------------------------------

struct ValueState<T> {
    value: Option<T>,
    phase: Phase,
    error: Option<String>,
    generation: u64,
    closed: bool,
}

/// Fetch lifecycle for one read-only value, replaced wholesale on every fetch.
pub struct ValueStore<S: ValueSource> {
    source: S,
    state: Mutex<ValueState<S::Value>>,
}

impl<S: ValueSource> ValueStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(ValueState {
                value: None,
                phase: Phase::Idle,
                error: None,
                generation: 0,
                closed: false,
            }),
        }
    }

    pub async fn mount(source: S) -> Self {
        let store = Self::new(source);
        let _ = store.refetch().await;
        store
    }

    fn state(&self) -> MutexGuard<'_, ValueState<S::Value>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn refetch(&self) -> Result<(), ServiceError> {
        let generation = {
            let mut state = self.state();
            state.generation += 1;
            if !state.closed {
                state.phase = Phase::Loading;
            }
            state.generation
        };

        let result = self.source.fetch().await;

        let mut state = self.state();
        if state.closed || state.generation != generation {
            debug!("value fetch superseded or store closed, dropping result");
            return result.map(drop);
        }
        match result {
            Ok(value) => {
                state.value = Some(value);
                state.error = None;
                state.phase = Phase::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "value fetch failed");
                state.error = Some(err.to_string());
                state.phase = Phase::Errored;
                Err(err)
            }
        }
    }

    pub fn close(&self) {
        self.state().closed = true;
    }

    pub fn value(&self) -> Option<S::Value> {
        self.state().value.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }
}

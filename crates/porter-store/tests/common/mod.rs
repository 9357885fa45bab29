//! In-process fake backends that count every call.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use porter_api::ApiError;
use porter_core::entities::Building;
use porter_core::query::ListScope;
use porter_core::seed;
use porter_store::{Backends, Created, Entity, EntityStore, Loader, SeedStore, StoreError};
use tokio::sync::Semaphore;

pub fn unavailable() -> StoreError {
    StoreError::Api(ApiError::Api {
        status: Some(503),
        message: "Service unavailable".into(),
    })
}

/// Wraps a [`SeedStore`], counting calls and optionally failing or pausing
/// list calls.
pub struct CountingStore<T: Entity> {
    inner: SeedStore<T>,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub scopes: Mutex<Vec<ListScope>>,
    failing_lists: AtomicUsize,
    failing_updates: Mutex<Vec<StoreError>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl<T: Entity> CountingStore<T> {
    pub fn new(items: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            inner: SeedStore::new(items),
            lists: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            scopes: Mutex::new(Vec::new()),
            failing_lists: AtomicUsize::new(0),
            failing_updates: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        })
    }

    /// Fail the next `n` list calls.
    pub fn fail_next_lists(&self, n: usize) {
        self.failing_lists.store(n, Ordering::SeqCst);
    }

    /// Fail the next update call with `error`.
    pub fn fail_next_update(&self, error: StoreError) {
        self.failing_updates.lock().push(error);
    }

    /// Let list calls made from now on run without waiting.
    pub fn ungate_lists(&self) {
        *self.gate.lock() = None;
    }

    /// Make list calls wait for a permit on the returned semaphore.
    pub fn gate_lists(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn total_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
            + self.creates.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    pub fn last_scope(&self) -> Option<ListScope> {
        self.scopes.lock().last().cloned()
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for CountingStore<T> {
    async fn list(&self, scope: &ListScope) -> Result<Vec<T>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.scopes.lock().push(scope.clone());
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let failing = self
            .failing_lists
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(unavailable());
        }
        self.inner.list(scope).await
    }

    async fn create(&self, draft: T::Draft) -> Result<Created<T>, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(draft).await
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let failure = self.failing_updates.lock().pop();
        if let Some(error) = failure {
            return Err(error);
        }
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

/// Building loader that replays scripted results, then succeeds.
pub struct ScriptedBuilding {
    pub calls: AtomicUsize,
    script: Mutex<Vec<StoreError>>,
}

impl ScriptedBuilding {
    pub fn ok() -> Arc<Self> {
        Self::failing(Vec::new())
    }

    /// Fail with each error in order before succeeding.
    pub fn failing(errors: Vec<StoreError>) -> Arc<Self> {
        let mut script = errors;
        script.reverse();
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(script),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Loader<Building> for ScriptedBuilding {
    async fn load(&self) -> Result<Building, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop();
        match next {
            Some(error) => Err(error),
            None => Ok(seed::building()),
        }
    }
}

/// Counting stand-ins for every live backend.
pub struct LiveFakes {
    pub issues: Arc<CountingStore<porter_core::entities::Issue>>,
    pub emails: Arc<CountingStore<porter_core::entities::Email>>,
    pub meetings: Arc<CountingStore<porter_core::entities::Meeting>>,
    pub suppliers: Arc<CountingStore<porter_core::entities::Supplier>>,
    pub calendar: Arc<CountingStore<porter_core::entities::CalendarEvent>>,
    pub building: Arc<ScriptedBuilding>,
}

impl LiveFakes {
    pub fn seeded() -> Self {
        Self {
            issues: CountingStore::new(seed::issues()),
            emails: CountingStore::new(seed::emails()),
            meetings: CountingStore::new(seed::meetings()),
            suppliers: CountingStore::new(seed::suppliers()),
            calendar: CountingStore::new(seed::calendar_events()),
            building: ScriptedBuilding::ok(),
        }
    }

    pub fn backends(&self) -> Backends {
        Backends {
            issues: self.issues.clone(),
            emails: self.emails.clone(),
            meetings: self.meetings.clone(),
            suppliers: self.suppliers.clone(),
            calendar: self.calendar.clone(),
            building: self.building.clone(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.issues.total_calls()
            + self.emails.total_calls()
            + self.meetings.total_calls()
            + self.suppliers.total_calls()
            + self.calendar.total_calls()
            + self.building.calls()
    }
}

//! Load-once resources: building detail, suppliers, meetings, calendar.
//!
//! Gated on [`CacheState`], not on data presence: a failed load stays
//! `Failed` until [`CachedSlice::refresh`] is called, so an error response
//! can neither loop nor leave the slice stuck in `Loading`.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use porter_core::cache::CacheState;
use porter_core::query::ListScope;

use crate::entity::{Entity, EntityStore};
use crate::error::StoreError;

/// Produces the value behind a [`CachedSlice`].
#[async_trait]
pub trait Loader<T>: Send + Sync {
    async fn load(&self) -> Result<T, StoreError>;
}

/// Loads a full list from an [`EntityStore`].
pub struct ListLoader<T: Entity> {
    store: Arc<dyn EntityStore<T>>,
    scope: ListScope,
}

impl<T: Entity> ListLoader<T> {
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore<T>>, scope: ListScope) -> Self {
        Self { store, scope }
    }
}

#[async_trait]
impl<T: Entity> Loader<Vec<T>> for ListLoader<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        self.store.list(&self.scope).await
    }
}

/// Fixed value; example mode.
pub struct StaticLoader<T>(pub T);

#[async_trait]
impl<T: Clone + Send + Sync> Loader<T> for StaticLoader<T> {
    async fn load(&self) -> Result<T, StoreError> {
        Ok(self.0.clone())
    }
}

/// A shared, lazily loaded value. Clones share state.
pub struct CachedSlice<T> {
    name: &'static str,
    loader: Arc<dyn Loader<T>>,
    state: Arc<RwLock<CacheState<T>>>,
}

impl<T> Clone for CachedSlice<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            loader: Arc::clone(&self.loader),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> CachedSlice<T> {
    pub fn new(name: &'static str, loader: Arc<dyn Loader<T>>) -> Self {
        Self {
            name,
            loader,
            state: Arc::new(RwLock::new(CacheState::Uninitialized)),
        }
    }

    #[must_use]
    pub fn state(&self) -> CacheState<T> {
        self.state.read().clone()
    }

    #[must_use]
    pub fn data(&self) -> Option<T> {
        self.state.read().data().cloned()
    }

    /// Load unless a load was already attempted.
    ///
    /// Returns the resulting state. `Err` only when this call performed the
    /// fetch and it failed; the state is `Failed` in that case too.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`StoreError`] from a fetch made by this call.
    pub async fn ensure_loaded(&self) -> Result<CacheState<T>, StoreError> {
        {
            let mut state = self.state.write();
            if !state.should_fetch() {
                return Ok(state.clone());
            }
            *state = CacheState::Loading;
        }
        self.run().await
    }

    /// Explicit reload, also after a failure. A no-op while a load is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`StoreError`] if the fetch fails.
    pub async fn refresh(&self) -> Result<CacheState<T>, StoreError> {
        {
            let mut state = self.state.write();
            if state.is_loading() {
                return Ok(CacheState::Loading);
            }
            *state = CacheState::Loading;
        }
        self.run().await
    }

    /// Forget the value (logout).
    pub fn reset(&self) {
        *self.state.write() = CacheState::Uninitialized;
    }

    async fn run(&self) -> Result<CacheState<T>, StoreError> {
        match self.loader.load().await {
            Ok(value) => {
                let ready = CacheState::Ready(value);
                *self.state.write() = ready.clone();
                Ok(ready)
            }
            Err(error) => {
                tracing::warn!(slice = self.name, %error, "load failed");
                *self.state.write() = CacheState::Failed(error.user_message());
                Err(error)
            }
        }
    }
}

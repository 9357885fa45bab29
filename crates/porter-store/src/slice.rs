//! Shared state for list-backed slices.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::error::StoreError;

/// Failure returned by slice operations. Carries the same message that was
/// written to the slice's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{error}")]
pub struct OpFailure {
    pub error: String,
    /// The backend rejected the credentials; callers end the session.
    #[serde(skip)]
    pub auth_failure: bool,
}

impl OpFailure {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            auth_failure: false,
        }
    }
}

impl From<&StoreError> for OpFailure {
    fn from(error: &StoreError) -> Self {
        Self {
            error: error.user_message(),
            auth_failure: error.is_auth_failure(),
        }
    }
}

/// Result of a slice operation. Slice operations never propagate a
/// [`StoreError`]; they record it and hand back an `OpFailure`.
pub type OpResult<T> = Result<T, OpFailure>;

/// Point-in-time view of a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub(crate) struct SliceState<T> {
    pub items: Vec<T>,
    /// Operations currently awaiting the backend.
    pub in_flight: usize,
    pub error: Option<String>,
    /// Sequence number of the newest list fetch whose result was applied.
    pub applied_fetch: u64,
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            in_flight: 0,
            error: None,
            applied_fetch: 0,
        }
    }
}

pub(crate) type SharedState<T> = Arc<RwLock<SliceState<T>>>;

/// Marks one operation in flight for as long as it lives. Loading stays true
/// until the last overlapping operation finishes.
pub(crate) struct LoadingGuard<T> {
    state: SharedState<T>,
}

impl<T> LoadingGuard<T> {
    pub fn start(state: &SharedState<T>) -> Self {
        state.write().in_flight += 1;
        Self {
            state: Arc::clone(state),
        }
    }
}

impl<T> Drop for LoadingGuard<T> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// Record a failure in the error slot and convert it.
pub(crate) fn record_failure<T>(state: &SharedState<T>, operation: &str, error: &StoreError) -> OpFailure {
    tracing::warn!(operation, %error, "slice operation failed");
    let failure = OpFailure::from(error);
    state.write().error = Some(failure.error.clone());
    failure
}

pub(crate) fn snapshot<T: Clone>(state: &SharedState<T>) -> SliceSnapshot<T> {
    let state = state.read();
    SliceSnapshot {
        items: state.items.clone(),
        loading: state.in_flight > 0,
        error: state.error.clone(),
    }
}

//! Issue data-access operations.
//!
//! Every operation marks the slice loading while it awaits the backend,
//! clears or fills the shared error slot, and returns an [`OpResult`]. List
//! fetches replace the collection wholesale; a response from a fetch that
//! was started before the currently applied one is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use porter_core::entities::Issue;
use porter_core::enums::{IssuePriority, IssueStatus};
use porter_core::query::{IssueFilter, ListScope};
use porter_core::updates::{IssueDraft, IssuePatch};
use tokio::task::JoinHandle;

use crate::entity::{Created, Entity, EntityStore};
use crate::slice::{
    LoadingGuard, OpFailure, OpResult, SharedState, SliceSnapshot, record_failure, snapshot,
};

#[derive(Clone)]
pub struct IssueSlice {
    backend: Arc<dyn EntityStore<Issue>>,
    state: SharedState<Issue>,
    fetch_seq: Arc<AtomicU64>,
    background: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl IssueSlice {
    #[must_use]
    pub fn new(backend: Arc<dyn EntityStore<Issue>>) -> Self {
        Self {
            backend,
            state: SharedState::default(),
            fetch_seq: Arc::new(AtomicU64::new(0)),
            background: Arc::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SliceSnapshot<Issue> {
        snapshot(&self.state)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Issue> {
        self.state.read().items.clone()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Issue> {
        self.state.read().items.iter().find(|i| i.id == id).cloned()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().in_flight > 0
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub(crate) const fn state(&self) -> &SharedState<Issue> {
        &self.state
    }

    /// Replace the collection with every issue of a building.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails; the previous
    /// collection is kept.
    pub async fn fetch_for_building(&self, building_id: u64) -> OpResult<usize> {
        self.fetch(ListScope::building(building_id)).await
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn fetch_by_status(&self, building_id: u64, status: IssueStatus) -> OpResult<usize> {
        self.fetch(ListScope::building(building_id).with_filter(IssueFilter::Status(status)))
            .await
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn fetch_by_category(&self, building_id: u64, category: &str) -> OpResult<usize> {
        self.fetch(
            ListScope::building(building_id)
                .with_filter(IssueFilter::Category(category.to_string())),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn fetch_by_priority(
        &self,
        building_id: u64,
        priority: IssuePriority,
    ) -> OpResult<usize> {
        self.fetch(ListScope::building(building_id).with_filter(IssueFilter::Priority(priority)))
            .await
    }

    /// Fetch any scope and replace the collection with the result.
    ///
    /// Returns the size of the collection afterwards. A response that lost
    /// to a later fetch is dropped, and the count is then the later one's.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn fetch(&self, scope: ListScope) -> OpResult<usize> {
        let _loading = LoadingGuard::start(&self.state);
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        match self.backend.list(&scope).await {
            Ok(items) => {
                let received = items.len();
                if self.apply_fetch(seq, items, true) {
                    return Ok(received);
                }
                let current = self.state.read().items.len();
                tracing::info!(seq, received, current, "issue fetch superseded by a later one");
                Ok(current)
            }
            Err(error) => Err(record_failure(&self.state, "fetch_issues", &error)),
        }
    }

    /// Create an issue and append it to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] for an empty title or a failed backend call.
    pub async fn create(&self, draft: IssueDraft) -> OpResult<Created<Issue>> {
        if draft.title.trim().is_empty() {
            let failure = OpFailure::new("An issue needs a title.");
            self.state.write().error = Some(failure.error.clone());
            return Err(failure);
        }
        let _loading = LoadingGuard::start(&self.state);
        match self.backend.create(draft).await {
            Ok(created) => {
                let mut state = self.state.write();
                state.error = None;
                state.items.push(created.entity.clone());
                tracing::info!(id = %created.entity.id, "issue created");
                Ok(created)
            }
            Err(error) => Err(record_failure(&self.state, "create_issue", &error)),
        }
    }

    /// Change an issue's status by its label.
    ///
    /// Unknown labels map to "Not started". With a `building_id`, a
    /// background refetch of that building's issues is started once the
    /// update succeeds; its failure is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn update_status(
        &self,
        id: &str,
        label: &str,
        building_id: Option<u64>,
    ) -> OpResult<Issue> {
        let patch = IssuePatch::status_only(IssueStatus::from_label(label));
        let updated = self.apply_update(id, &patch, "update_issue_status").await?;
        if let Some(building_id) = building_id {
            self.spawn_refetch(building_id);
        }
        Ok(updated)
    }

    /// Send a partial edit and merge it into the local copy.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] for an empty patch or a failed backend call.
    pub async fn edit(&self, id: &str, patch: IssuePatch) -> OpResult<Issue> {
        if patch.is_empty() {
            let failure = OpFailure::new("Nothing to update.");
            self.state.write().error = Some(failure.error.clone());
            return Err(failure);
        }
        self.apply_update(id, &patch, "edit_issue").await
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn delete(&self, id: &str) -> OpResult<()> {
        let _loading = LoadingGuard::start(&self.state);
        match self.backend.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.error = None;
                state.items.retain(|issue| issue.id != id);
                Ok(())
            }
            Err(error) => Err(record_failure(&self.state, "delete_issue", &error)),
        }
    }

    /// Wait for background refetches started so far.
    pub async fn settle(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.background.lock());
        for handle in handles {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "background issue refresh task aborted");
            }
        }
    }

    async fn apply_update(&self, id: &str, patch: &IssuePatch, operation: &str) -> OpResult<Issue> {
        let _loading = LoadingGuard::start(&self.state);
        let server_copy = match self.backend.update(id, patch).await {
            Ok(copy) => copy,
            Err(error) => return Err(record_failure(&self.state, operation, &error)),
        };

        let mut state = self.state.write();
        state.error = None;
        if let Some(pos) = state.items.iter().position(|issue| issue.id == id) {
            let local = &mut state.items[pos];
            local.apply_patch(patch, Utc::now());
            return Ok(local.clone());
        }
        match server_copy {
            Some(mut issue) => {
                issue.touch(Utc::now());
                state.items.push(issue.clone());
                Ok(issue)
            }
            None => Err(OpFailure::new(format!("Issue {id} is not loaded."))),
        }
    }

    /// Returns whether the result was applied.
    fn apply_fetch(&self, seq: u64, items: Vec<Issue>, clear_error: bool) -> bool {
        let mut state = self.state.write();
        if seq < state.applied_fetch {
            tracing::debug!(seq, applied = state.applied_fetch, "discarding stale issue list");
            return false;
        }
        state.applied_fetch = seq;
        state.items = items;
        if clear_error {
            state.error = None;
        }
        true
    }

    fn spawn_refetch(&self, building_id: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(building_id, "no async runtime; skipping background issue refresh");
            return;
        };
        let slice = self.clone();
        let handle = runtime.spawn(async move {
            let seq = slice.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
            match slice.backend.list(&ListScope::building(building_id)).await {
                Ok(items) => {
                    slice.apply_fetch(seq, items, false);
                }
                Err(error) => {
                    tracing::warn!(building_id, %error, "background issue refresh failed");
                }
            }
        });
        self.background.lock().push(handle);
    }
}

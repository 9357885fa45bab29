//! Email slice. The backend serves no email endpoints, so in both modes the
//! collection comes from an in-memory store.

use std::sync::Arc;

use porter_core::entities::Email;
use porter_core::query::ListScope;
use porter_core::updates::EmailPatch;

use crate::entity::{Entity, EntityStore};
use crate::slice::{
    LoadingGuard, OpFailure, OpResult, SharedState, SliceSnapshot, record_failure, snapshot,
};

#[derive(Clone)]
pub struct EmailSlice {
    backend: Arc<dyn EntityStore<Email>>,
    state: SharedState<Email>,
}

impl EmailSlice {
    #[must_use]
    pub fn new(backend: Arc<dyn EntityStore<Email>>) -> Self {
        Self {
            backend,
            state: SharedState::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SliceSnapshot<Email> {
        snapshot(&self.state)
    }

    #[must_use]
    pub fn items(&self) -> Vec<Email> {
        self.state.read().items.clone()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Email> {
        self.state.read().items.iter().find(|e| e.id == id).cloned()
    }

    pub(crate) const fn state(&self) -> &SharedState<Email> {
        &self.state
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn load(&self) -> OpResult<usize> {
        let _loading = LoadingGuard::start(&self.state);
        match self.backend.list(&ListScope::default()).await {
            Ok(items) => {
                let count = items.len();
                let mut state = self.state.write();
                state.items = items;
                state.error = None;
                Ok(count)
            }
            Err(error) => Err(record_failure(&self.state, "load_emails", &error)),
        }
    }

    /// Add an email. An empty `id` gets a generated `EML-YYYY-NNN`.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn add(&self, email: Email) -> OpResult<Email> {
        let _loading = LoadingGuard::start(&self.state);
        match self.backend.create(email).await {
            Ok(created) => {
                let mut state = self.state.write();
                state.error = None;
                state.items.push(created.entity.clone());
                Ok(created.entity)
            }
            Err(error) => Err(record_failure(&self.state, "add_email", &error)),
        }
    }

    /// # Errors
    ///
    /// Returns [`OpFailure`] if the backend call fails.
    pub async fn patch(&self, id: &str, patch: EmailPatch) -> OpResult<Email> {
        let _loading = LoadingGuard::start(&self.state);
        let server_copy = match self.backend.update(id, &patch).await {
            Ok(copy) => copy,
            Err(error) => return Err(record_failure(&self.state, "patch_email", &error)),
        };
        let mut state = self.state.write();
        state.error = None;
        if let Some(pos) = state.items.iter().position(|email| email.id == id) {
            let local = &mut state.items[pos];
            local.apply_patch(&patch, chrono::Utc::now());
            return Ok(local.clone());
        }
        let email =
            server_copy.ok_or_else(|| OpFailure::new(format!("Email {id} is not loaded.")))?;
        state.items.push(email.clone());
        Ok(email)
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
                state.items.retain(|email| email.id != id);
                Ok(())
            }
            Err(error) => Err(record_failure(&self.state, "delete_email", &error)),
        }
    }
}

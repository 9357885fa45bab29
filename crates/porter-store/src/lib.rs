//! # porter-store
//!
//! Client-side state for Porter.
//!
//! One store abstraction over two interchangeable backends: [`SeedStore`]
//! (example mode, in memory, no network) and [`ApiStore`] (live backend).
//! Both implement [`EntityStore`]; [`Store::new`] picks one set by
//! [`DataMode`]. On top sit the slices: [`IssueSlice`] and [`EmailSlice`]
//! for list-backed entities, [`CachedSlice`] for load-once resources, and
//! [`BuildingBootstrap`] for the sign-in → building-ready sequence.

pub mod api_store;
pub mod bootstrap;
pub mod cached;
pub mod emails;
pub mod entity;
pub mod error;
pub mod issues;
pub mod seed_store;
pub mod slice;

pub use api_store::ApiStore;
pub use bootstrap::{BootstrapOutcome, BuildingBootstrap};
pub use cached::{CachedSlice, ListLoader, Loader, StaticLoader};
pub use emails::EmailSlice;
pub use entity::{Created, Entity, EntityStore};
pub use error::StoreError;
pub use issues::IssueSlice;
pub use seed_store::SeedStore;
pub use slice::{OpFailure, OpResult, SliceSnapshot};

use std::sync::Arc;

use chrono::Utc;
use porter_api::ApiClient;
use porter_core::entities::{Building, CalendarEvent, Email, Issue, Meeting, Supplier};
use porter_core::enums::EmailStatus;
use porter_core::query::ListScope;
use porter_core::seed;
use serde::Serialize;

/// Where data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    /// Fixed local dataset; no network calls.
    Example,
    Live,
}

/// One backend per entity type.
#[derive(Clone)]
pub struct Backends {
    pub issues: Arc<dyn EntityStore<Issue>>,
    pub emails: Arc<dyn EntityStore<Email>>,
    pub meetings: Arc<dyn EntityStore<Meeting>>,
    pub suppliers: Arc<dyn EntityStore<Supplier>>,
    pub calendar: Arc<dyn EntityStore<CalendarEvent>>,
    pub building: Arc<dyn Loader<Building>>,
}

impl Backends {
    /// The example-mode dataset.
    #[must_use]
    pub fn example() -> Self {
        Self {
            issues: Arc::new(SeedStore::new(seed::issues())),
            emails: Arc::new(SeedStore::new(seed::emails())),
            meetings: Arc::new(SeedStore::new(seed::meetings())),
            suppliers: Arc::new(SeedStore::new(seed::suppliers())),
            calendar: Arc::new(SeedStore::new(seed::calendar_events())),
            building: Arc::new(StaticLoader(seed::building())),
        }
    }

    /// The live backend. Emails have no server endpoint and start empty.
    #[must_use]
    pub fn live(client: ApiClient) -> Self {
        let api = Arc::new(ApiStore::new(client));
        Self {
            issues: api.clone(),
            emails: Arc::new(SeedStore::<Email>::empty()),
            meetings: api.clone(),
            suppliers: api.clone(),
            calendar: api.clone(),
            building: api,
        }
    }
}

/// Every slice of client state.
#[derive(Clone)]
pub struct Store {
    mode: DataMode,
    pub issues: IssueSlice,
    pub emails: EmailSlice,
    pub meetings: CachedSlice<Vec<Meeting>>,
    pub suppliers: CachedSlice<Vec<Supplier>>,
    pub calendar: CachedSlice<Vec<CalendarEvent>>,
    pub building: CachedSlice<Building>,
}

impl Store {
    /// Build the store for `mode`. In example mode `live` is dropped
    /// untouched and the seed dataset is used instead.
    #[must_use]
    pub fn new(mode: DataMode, live: Backends) -> Self {
        let backends = match mode {
            DataMode::Example => {
                drop(live);
                Backends::example()
            }
            DataMode::Live => live,
        };
        tracing::debug!(?mode, "store initialised");
        Self::from_backends(mode, backends, ListScope::default())
    }

    /// Build the store directly on `backends`, with cached lists scoped by
    /// `scope`.
    #[must_use]
    pub fn from_backends(mode: DataMode, backends: Backends, scope: ListScope) -> Self {
        Self {
            mode,
            issues: IssueSlice::new(backends.issues),
            emails: EmailSlice::new(backends.emails),
            meetings: CachedSlice::new(
                "meetings",
                Arc::new(ListLoader::new(backends.meetings, scope.clone())),
            ),
            suppliers: CachedSlice::new(
                "suppliers",
                Arc::new(ListLoader::new(backends.suppliers, scope.clone())),
            ),
            calendar: CachedSlice::new(
                "calendar",
                Arc::new(ListLoader::new(backends.calendar, scope)),
            ),
            building: CachedSlice::new("building", backends.building),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> DataMode {
        self.mode
    }

    #[must_use]
    pub const fn is_example(&self) -> bool {
        matches!(self.mode, DataMode::Example)
    }

    /// Bootstrap over this store's building slice.
    #[must_use]
    pub fn bootstrap(&self, has_session: bool) -> BuildingBootstrap {
        BuildingBootstrap::new(self.building.clone(), has_session || self.is_example())
    }

    /// Link an email and an issue in both directions. The email is marked
    /// `Completed`. Both records must be loaded; linking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OpFailure`] if either record is not loaded.
    pub fn link_email_to_issue(&self, email_id: &str, issue_id: &str) -> OpResult<(Email, Issue)> {
        // Lock order: emails, then issues.
        let mut emails = self.emails.state().write();
        let mut issues = self.issues.state().write();

        let email_pos = emails
            .items
            .iter()
            .position(|email| email.id == email_id)
            .ok_or_else(|| OpFailure::new(format!("Email {email_id} is not loaded.")))?;
        let issue_pos = issues
            .items
            .iter()
            .position(|issue| issue.id == issue_id)
            .ok_or_else(|| OpFailure::new(format!("Issue {issue_id} is not loaded.")))?;

        let email = &mut emails.items[email_pos];
        let issue = &mut issues.items[issue_pos];
        let email_changed = email.link_issue(issue_id);
        let issue_changed = issue.link_email(email_id);
        if issue_changed {
            issue.touch(Utc::now());
        }
        debug_assert_eq!(email.status, EmailStatus::Completed);
        tracing::info!(email_id, issue_id, email_changed, issue_changed, "linked email to issue");
        Ok((email.clone(), issue.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn example_store_serves_seed_data() {
        let store = Store::new(DataMode::Example, Backends::example());
        assert!(store.is_example());
        assert_eq!(store.issues.fetch_for_building(1).await.unwrap(), 5);
        let suppliers = store.suppliers.ensure_loaded().await.unwrap();
        assert_eq!(suppliers.data().map(Vec::len), Some(2));
        let outcome = store.bootstrap(false).ensure_building().await;
        assert!(matches!(outcome, BootstrapOutcome::Ready(b) if b.name == "Maple Court"));
    }

    #[tokio::test]
    async fn linking_requires_loaded_records() {
        let store = Store::new(DataMode::Example, Backends::example());
        let failure = store
            .link_email_to_issue("EML-2024-002", "ISS-2024-002")
            .unwrap_err();
        assert_eq!(failure.error, "Email EML-2024-002 is not loaded.");
    }
}

//! In-memory backend: example mode, and entities the server does not serve.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use porter_core::ids::IdGenerator;
use porter_core::query::ListScope;

use crate::entity::{Created, Entity, EntityStore};
use crate::error::StoreError;

struct Inner<T> {
    items: Vec<T>,
    ids: IdGenerator,
}

/// A process-local collection. Never performs I/O.
pub struct SeedStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Entity> SeedStore<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let ids = IdGenerator::seeded(items.iter().map(|item| item.id()));
        Self {
            inner: RwLock::new(Inner { items, ids }),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found<T: Entity>(id: &str) -> StoreError {
    StoreError::NotFound {
        entity: T::KIND,
        id: id.to_string(),
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for SeedStore<T> {
    async fn list(&self, scope: &ListScope) -> Result<Vec<T>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .items
            .iter()
            .filter(|item| item.in_scope(scope))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: T::Draft) -> Result<Created<T>, StoreError> {
        let now = Utc::now();
        let mut inner = self.inner.write();
        let id = match T::draft_id(&draft) {
            Some(id) => {
                if inner.items.iter().any(|item| item.id() == id) {
                    return Err(StoreError::Validation(format!(
                        "{} {id} already exists",
                        T::KIND
                    )));
                }
                id.to_string()
            }
            None => inner.ids.next_id(T::ID_PREFIX, now.year()),
        };
        inner.ids.observe(&id);
        let entity = T::from_draft(draft, id, now);
        inner.items.push(entity.clone());
        tracing::debug!(kind = T::KIND, id = entity.id(), "created locally");
        Ok(Created { entity, raw: None })
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError> {
        let mut inner = self.inner.write();
        let item = inner
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        item.apply_patch(patch, Utc::now());
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let before = inner.items.len();
        inner.items.retain(|item| item.id() != id);
        if inner.items.len() == before {
            return Err(not_found::<T>(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porter_core::entities::Issue;
    use porter_core::enums::{IssuePriority, IssueStatus};
    use porter_core::query::IssueFilter;
    use porter_core::seed;
    use porter_core::updates::{IssueDraft, IssuePatch};

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            building_id: Some(1),
            title: title.into(),
            summary: String::new(),
            category: "Repairs".into(),
            priority: IssuePriority::Medium,
            status: None,
            email_id: None,
        }
    }

    #[tokio::test]
    async fn lists_by_scope() {
        let store = SeedStore::new(seed::issues());
        let all = store.list(&ListScope::building(1)).await.unwrap();
        assert_eq!(all.len(), 5);
        let paused = store
            .list(&ListScope::building(1).with_filter(IssueFilter::Status(IssueStatus::Paused)))
            .await
            .unwrap();
        assert_eq!(paused.len(), 1);
        assert!(store.list(&ListScope::building(9)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store: SeedStore<Issue> = SeedStore::empty();
        let year = Utc::now().year();
        let first = store.create(draft("one")).await.unwrap().entity;
        let second = store.create(draft("two")).await.unwrap().entity;
        store.delete(&second.id).await.unwrap();
        let third = store.create(draft("three")).await.unwrap().entity;

        assert_eq!(first.id, format!("ISS-{year}-001"));
        assert_eq!(third.id, format!("ISS-{year}-003"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn update_applies_patch() {
        let store = SeedStore::new(seed::issues());
        let updated = store
            .update("ISS-2024-001", &IssuePatch::status_only(IssueStatus::Closed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, IssueStatus::Closed);
        assert!(updated.has_update);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = SeedStore::new(seed::issues());
        let err = store.delete("ISS-2024-404").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "issue", .. }));
        let err = store
            .update("ISS-2024-404", &IssuePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn duplicate_draft_ids_are_rejected() {
        let store = SeedStore::new(seed::emails());
        let duplicate = seed::emails().remove(0);
        assert!(matches!(
            store.create(duplicate).await.unwrap_err(),
            StoreError::Validation(_)
        ));
    }
}

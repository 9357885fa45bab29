//! Live backend over [`ApiClient`].

use async_trait::async_trait;
use porter_api::ApiClient;
use porter_core::entities::{Building, CalendarEvent, Issue, Meeting, Supplier};
use porter_core::query::ListScope;
use porter_core::updates::{IssueDraft, IssuePatch, SupplierDraft};

use crate::cached::Loader;
use crate::entity::{Created, Entity, EntityStore};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct ApiStore {
    client: ApiClient,
}

impl ApiStore {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn unsupported<T: Entity>(operation: &'static str) -> StoreError {
    StoreError::Unsupported {
        entity: T::KIND,
        operation,
    }
}

#[async_trait]
impl EntityStore<Issue> for ApiStore {
    async fn list(&self, scope: &ListScope) -> Result<Vec<Issue>, StoreError> {
        Ok(self
            .client
            .list_issues(scope.building_id, &scope.issues)
            .await?)
    }

    async fn create(&self, draft: IssueDraft) -> Result<Created<Issue>, StoreError> {
        let created = self.client.create_issue(&draft).await?;
        Ok(Created {
            entity: created.issue,
            raw: Some(created.raw),
        })
    }

    async fn update(&self, id: &str, patch: &IssuePatch) -> Result<Option<Issue>, StoreError> {
        Ok(self.client.update_issue(id, patch).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        Ok(self.client.delete_issue(id).await?)
    }
}

#[async_trait]
impl EntityStore<Meeting> for ApiStore {
    async fn list(&self, scope: &ListScope) -> Result<Vec<Meeting>, StoreError> {
        let meetings = self.client.list_meetings().await?;
        Ok(meetings.into_iter().filter(|m| m.in_scope(scope)).collect())
    }

    async fn create(&self, _draft: Meeting) -> Result<Created<Meeting>, StoreError> {
        Err(unsupported::<Meeting>("create"))
    }

    async fn update(&self, _id: &str, _patch: &()) -> Result<Option<Meeting>, StoreError> {
        Err(unsupported::<Meeting>("update"))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(unsupported::<Meeting>("delete"))
    }
}

#[async_trait]
impl EntityStore<CalendarEvent> for ApiStore {
    async fn list(&self, _scope: &ListScope) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self.client.calendar().await?)
    }

    async fn create(&self, _draft: CalendarEvent) -> Result<Created<CalendarEvent>, StoreError> {
        Err(unsupported::<CalendarEvent>("create"))
    }

    async fn update(&self, _id: &str, _patch: &()) -> Result<Option<CalendarEvent>, StoreError> {
        Err(unsupported::<CalendarEvent>("update"))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(unsupported::<CalendarEvent>("delete"))
    }
}

#[async_trait]
impl EntityStore<Supplier> for ApiStore {
    async fn list(&self, _scope: &ListScope) -> Result<Vec<Supplier>, StoreError> {
        Ok(self.client.list_suppliers().await?)
    }

    async fn create(&self, draft: SupplierDraft) -> Result<Created<Supplier>, StoreError> {
        let supplier = self.client.create_supplier(&draft).await?;
        Ok(Created {
            entity: supplier,
            raw: None,
        })
    }

    async fn update(&self, _id: &str, _patch: &()) -> Result<Option<Supplier>, StoreError> {
        Err(unsupported::<Supplier>("update"))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(unsupported::<Supplier>("delete"))
    }
}

#[async_trait]
impl Loader<Building> for ApiStore {
    async fn load(&self) -> Result<Building, StoreError> {
        Ok(self.client.building_detail().await?)
    }
}

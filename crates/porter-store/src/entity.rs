//! The read/write contract shared by the example-mode and live backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use porter_core::entities::{CalendarEvent, Email, Issue, Meeting, Supplier};
use porter_core::ids::{PREFIX_EMAIL, PREFIX_EVENT, PREFIX_ISSUE, PREFIX_MEETING, PREFIX_SUPPLIER};
use porter_core::query::ListScope;
use porter_core::updates::{EmailPatch, IssueDraft, IssuePatch, SupplierDraft};

use crate::error::StoreError;

/// A record a store can hold.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Singular name used in errors and logs.
    const KIND: &'static str;
    /// Prefix for locally generated IDs.
    const ID_PREFIX: &'static str;

    type Draft: Send + Sync;
    type Patch: Send + Sync;

    fn id(&self) -> &str;

    /// Build a new record from a draft. `id` is only used when the draft
    /// does not carry one of its own.
    fn from_draft(draft: Self::Draft, id: String, now: DateTime<Utc>) -> Self;

    /// Whether the draft already names its ID.
    fn draft_id(_draft: &Self::Draft) -> Option<&str> {
        None
    }

    fn apply_patch(&mut self, patch: &Self::Patch, now: DateTime<Utc>);

    fn in_scope(&self, _scope: &ListScope) -> bool {
        true
    }
}

/// A newly created record, plus the backend's raw payload when it sent one.
#[derive(Debug, Clone)]
pub struct Created<T> {
    pub entity: T,
    pub raw: Option<serde_json::Value>,
}

/// CRUD over one entity type.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    async fn list(&self, scope: &ListScope) -> Result<Vec<T>, StoreError>;

    async fn create(&self, draft: T::Draft) -> Result<Created<T>, StoreError>;

    /// Returns the backend's updated copy when it sends one back.
    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

fn building_matches(record: Option<u64>, scope: &ListScope) -> bool {
    match (scope.building_id, record) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    }
}

impl Entity for Issue {
    const KIND: &'static str = "issue";
    const ID_PREFIX: &'static str = PREFIX_ISSUE;
    type Draft = IssueDraft;
    type Patch = IssuePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: IssueDraft, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            building_id: draft.building_id,
            title: draft.title,
            summary: draft.summary,
            category: draft.category,
            priority: draft.priority,
            status: draft.status.unwrap_or_default(),
            created_at: now,
            last_updated: now,
            has_update: false,
            linked_email_ids: draft.email_id.iter().cloned().collect(),
            email_id: draft.email_id,
            linked_issue_ids: Vec::new(),
        }
    }

    fn apply_patch(&mut self, patch: &IssuePatch, now: DateTime<Utc>) {
        self.apply(patch);
        self.touch(now);
    }

    fn in_scope(&self, scope: &ListScope) -> bool {
        building_matches(self.building_id, scope) && scope.issues.matches(self)
    }
}

impl Entity for Email {
    const KIND: &'static str = "email";
    const ID_PREFIX: &'static str = PREFIX_EMAIL;
    type Draft = Self;
    type Patch = EmailPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: Self, id: String, _now: DateTime<Utc>) -> Self {
        if draft.id.is_empty() { Self { id, ..draft } } else { draft }
    }

    fn draft_id(draft: &Self) -> Option<&str> {
        (!draft.id.is_empty()).then_some(draft.id.as_str())
    }

    fn apply_patch(&mut self, patch: &EmailPatch, _now: DateTime<Utc>) {
        self.apply(patch);
    }
}

impl Entity for Meeting {
    const KIND: &'static str = "meeting";
    const ID_PREFIX: &'static str = PREFIX_MEETING;
    type Draft = Self;
    type Patch = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: Self, id: String, _now: DateTime<Utc>) -> Self {
        if draft.id.is_empty() { Self { id, ..draft } } else { draft }
    }

    fn draft_id(draft: &Self) -> Option<&str> {
        (!draft.id.is_empty()).then_some(draft.id.as_str())
    }

    fn apply_patch(&mut self, _patch: &(), _now: DateTime<Utc>) {}

    fn in_scope(&self, scope: &ListScope) -> bool {
        building_matches(self.building_id, scope)
    }
}

impl Entity for CalendarEvent {
    const KIND: &'static str = "calendar event";
    const ID_PREFIX: &'static str = PREFIX_EVENT;
    type Draft = Self;
    type Patch = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: Self, id: String, _now: DateTime<Utc>) -> Self {
        if draft.id.is_empty() { Self { id, ..draft } } else { draft }
    }

    fn draft_id(draft: &Self) -> Option<&str> {
        (!draft.id.is_empty()).then_some(draft.id.as_str())
    }

    fn apply_patch(&mut self, _patch: &(), _now: DateTime<Utc>) {}
}

impl Entity for Supplier {
    const KIND: &'static str = "supplier";
    const ID_PREFIX: &'static str = PREFIX_SUPPLIER;
    type Draft = SupplierDraft;
    type Patch = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: SupplierDraft, id: String, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            service: draft.service,
            contact_name: draft.contact_name,
            email: draft.email,
            phone: draft.phone,
        }
    }

    fn apply_patch(&mut self, _patch: &(), _now: DateTime<Utc>) {}
}

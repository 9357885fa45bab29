//! Sign-in → building-ready sequencing.
//!
//! The building fetch runs at most once per session phase. A failed fetch
//! parks the session in `AuthenticatedNoBuilding` until
//! [`BuildingBootstrap::refresh_building`] is called. A 401/403 from the
//! fetch means the credential has expired: the persisted session is cleared
//! and the phase drops to `Unauthenticated`.

use std::sync::Arc;

use parking_lot::RwLock;
use porter_auth::{SessionPhase, SessionStore};
use porter_core::cache::CacheState;
use porter_core::entities::Building;
use serde::Serialize;

use crate::cached::CachedSlice;
use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum BootstrapOutcome {
    Ready(Building),
    /// Another caller is fetching the building.
    InProgress,
    NotAuthenticated,
    /// The fetch failed; call `refresh_building` to retry.
    Failed(String),
    /// The backend rejected the token. The stored session has been cleared.
    SessionExpired,
}

#[derive(Clone)]
pub struct BuildingBootstrap {
    phase: Arc<RwLock<SessionPhase>>,
    building: CachedSlice<Building>,
    sessions: Option<SessionStore>,
}

impl BuildingBootstrap {
    #[must_use]
    pub fn new(building: CachedSlice<Building>, has_session: bool) -> Self {
        Self {
            phase: Arc::new(RwLock::new(SessionPhase::initial(has_session))),
            building,
            sessions: None,
        }
    }

    /// Store to clear when the session expires.
    #[must_use]
    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.sessions = Some(store);
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        *self.phase.read()
    }

    #[must_use]
    pub fn building(&self) -> Option<Building> {
        self.building.data()
    }

    pub fn begin_login(&self) -> bool {
        self.transition(SessionPhase::Authenticating)
    }

    pub fn login_succeeded(&self) -> bool {
        self.transition(SessionPhase::AuthenticatedNoBuilding)
    }

    pub fn login_failed(&self) -> bool {
        self.transition(SessionPhase::Unauthenticated)
    }

    /// Fetch the building unless it is loaded, being loaded, or already
    /// failed in this phase.
    pub async fn ensure_building(&self) -> BootstrapOutcome {
        match self.phase() {
            SessionPhase::Unauthenticated | SessionPhase::Authenticating => {
                return BootstrapOutcome::NotAuthenticated;
            }
            SessionPhase::FetchingBuilding => return BootstrapOutcome::InProgress,
            SessionPhase::Ready => {
                if let Some(building) = self.building.data() {
                    return BootstrapOutcome::Ready(building);
                }
            }
            SessionPhase::AuthenticatedNoBuilding => {}
        }

        match self.building.state() {
            CacheState::Failed(error) => return BootstrapOutcome::Failed(error),
            CacheState::Ready(building) => {
                self.force_phase(SessionPhase::Ready);
                return BootstrapOutcome::Ready(building);
            }
            CacheState::Loading => return BootstrapOutcome::InProgress,
            CacheState::Uninitialized => {}
        }

        if !self.transition(SessionPhase::FetchingBuilding) {
            return BootstrapOutcome::InProgress;
        }
        let result = self.building.ensure_loaded().await;
        self.finish(result)
    }

    /// Explicit refetch, the only way out of a failed fetch.
    pub async fn refresh_building(&self) -> BootstrapOutcome {
        if !self.phase().is_authenticated() {
            return BootstrapOutcome::NotAuthenticated;
        }
        if !self.transition(SessionPhase::FetchingBuilding) {
            return BootstrapOutcome::InProgress;
        }
        let result = self.building.refresh().await;
        self.finish(result)
    }

    /// Forced logout: clear the stored session and the building.
    pub fn expire(&self) {
        if let Some(store) = &self.sessions
            && let Err(error) = store.clear()
        {
            tracing::warn!(%error, "failed to clear stored session");
        }
        self.building.reset();
        let next = self.phase().expire();
        *self.phase.write() = next;
        tracing::info!("session expired; signed out");
    }

    fn finish(&self, result: Result<CacheState<Building>, StoreError>) -> BootstrapOutcome {
        match result {
            Ok(CacheState::Ready(building)) => {
                self.transition(SessionPhase::Ready);
                BootstrapOutcome::Ready(building)
            }
            Ok(CacheState::Failed(error)) => {
                self.transition(SessionPhase::AuthenticatedNoBuilding);
                BootstrapOutcome::Failed(error)
            }
            Ok(CacheState::Loading | CacheState::Uninitialized) => BootstrapOutcome::InProgress,
            // A 403 here means the token has expired.
            Err(error) if error.is_auth_failure() || error.is_forbidden() => {
                self.expire();
                BootstrapOutcome::SessionExpired
            }
            Err(error) => {
                self.transition(SessionPhase::AuthenticatedNoBuilding);
                BootstrapOutcome::Failed(error.user_message())
            }
        }
    }

    fn transition(&self, next: SessionPhase) -> bool {
        let mut phase = self.phase.write();
        if phase.can_transition_to(next) {
            tracing::debug!(from = %*phase, to = %next, "session phase");
            *phase = next;
            true
        } else {
            tracing::debug!(from = %*phase, to = %next, "ignoring session phase transition");
            false
        }
    }

    fn force_phase(&self, next: SessionPhase) {
        *self.phase.write() = next;
    }
}

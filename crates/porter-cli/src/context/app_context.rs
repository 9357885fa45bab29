use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use porter_api::{ApiClient, ApiError};
use porter_auth::{AuthError, AuthSession, SessionStore, resolve_session};
use porter_config::PorterConfig;
use porter_core::entities::Building;
use porter_core::query::ListScope;
use porter_core::seed::SEED_BUILDING_ID;
use porter_store::{Backends, BootstrapOutcome, BuildingBootstrap, DataMode, OpFailure, Store};

use crate::cli::GlobalFlags;
use crate::commands::shared::SessionExpired;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PorterConfig,
    pub sessions: SessionStore,
    pub session: Option<AuthSession>,
    pub client: ApiClient,
    pub backends: Backends,
    pub store: Store,
    pub bootstrap: BuildingBootstrap,
    building_id: Option<u64>,
    signed_out: Arc<AtomicBool>,
}

impl AppContext {
    /// Resolve the session, build the API client and pick the data mode.
    pub fn init(config: PorterConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        super::warn_unconfigured(&config);

        let mode = if flags.example || config.general.example_mode {
            DataMode::Example
        } else {
            DataMode::Live
        };

        let sessions =
            SessionStore::from_config(&config.auth).context("failed to resolve session storage")?;
        let session = load_session(&sessions)?;

        let signed_out = Arc::new(AtomicBool::new(false));
        let mut client = ApiClient::new(&config.api).context("failed to build HTTP client")?;
        if let Some(session) = &session {
            client = client.with_token(session.token.clone());
        }
        let client = {
            let sessions = sessions.clone();
            let signed_out = Arc::clone(&signed_out);
            client.with_unauthorized_hook(move || {
                if !signed_out.swap(true, Ordering::SeqCst) {
                    clear_session(&sessions);
                }
            })
        };

        let building_id = flags
            .building
            .or_else(|| session.as_ref().and_then(AuthSession::building_id))
            .or(config.general.default_building_id)
            .or_else(|| matches!(mode, DataMode::Example).then_some(SEED_BUILDING_ID));

        let backends = match mode {
            DataMode::Example => Backends::example(),
            DataMode::Live => Backends::live(client.clone()),
        };
        let scope = building_id.map_or_else(ListScope::default, ListScope::building);
        let store = Store::from_backends(mode, backends.clone(), scope);
        let bootstrap = store
            .bootstrap(session.is_some())
            .with_session_store(sessions.clone());

        tracing::debug!(?mode, building_id, signed_in = session.is_some(), "context ready");

        Ok(Self {
            config,
            sessions,
            session,
            client,
            backends,
            store,
            bootstrap,
            building_id,
            signed_out,
        })
    }

    #[must_use]
    pub const fn is_example(&self) -> bool {
        self.store.is_example()
    }

    /// Live commands need a stored session.
    pub fn require_session(&self) -> anyhow::Result<()> {
        if self.is_example() || self.session.is_some() {
            return Ok(());
        }
        Err(AuthError::NotAuthenticated.into())
    }

    /// Building named by `--building`, the session profile or config,
    /// without touching the network.
    #[must_use]
    pub const fn known_building_id(&self) -> Option<u64> {
        self.building_id
    }

    /// Building to operate on, fetching the user's building if nothing
    /// names one.
    pub async fn building_id(&self) -> anyhow::Result<u64> {
        if let Some(id) = self.building_id {
            return Ok(id);
        }
        self.ensure_building().await.map(|building| building.id)
    }

    pub async fn ensure_building(&self) -> anyhow::Result<Building> {
        let outcome = self.bootstrap.ensure_building().await;
        self.building_outcome(outcome)
    }

    pub async fn refresh_building(&self) -> anyhow::Result<Building> {
        let outcome = self.bootstrap.refresh_building().await;
        self.building_outcome(outcome)
    }

    fn building_outcome(&self, outcome: BootstrapOutcome) -> anyhow::Result<Building> {
        match outcome {
            BootstrapOutcome::Ready(building) => Ok(building),
            BootstrapOutcome::NotAuthenticated => Err(AuthError::NotAuthenticated.into()),
            BootstrapOutcome::SessionExpired => {
                self.signed_out.store(true, Ordering::SeqCst);
                Err(SessionExpired::default().into())
            }
            BootstrapOutcome::Failed(error) => {
                anyhow::bail!("could not load your building: {error} (retry with `porter building refresh`)")
            }
            BootstrapOutcome::InProgress => anyhow::bail!("building is already being loaded"),
        }
    }

    /// Convert a slice failure, ending the session when the backend
    /// rejected the credentials.
    pub fn op_error(&self, failure: OpFailure) -> anyhow::Error {
        if failure.auth_failure || self.signed_out.load(Ordering::SeqCst) {
            self.expire();
            return SessionExpired::new(failure.error).into();
        }
        anyhow::anyhow!(failure.error)
    }

    /// Convert a direct API failure the same way as [`Self::op_error`].
    /// A 403 is reported as is; only the building fetch treats it as expiry.
    pub fn api_error(&self, error: &ApiError) -> anyhow::Error {
        if error.is_unauthorized() {
            self.expire();
            return SessionExpired::new(error.user_message()).into();
        }
        anyhow::anyhow!(error.user_message())
    }

    fn expire(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
        self.bootstrap.expire();
    }

    /// Wait for background work before the process exits.
    pub async fn settle(&self) {
        self.store.issues.settle().await;
    }
}

fn load_session(sessions: &SessionStore) -> anyhow::Result<Option<AuthSession>> {
    match resolve_session(sessions) {
        Ok(session) => Ok(session),
        Err(AuthError::TokenExpired) => {
            tracing::warn!("stored session has expired; continuing signed out");
            Ok(None)
        }
        Err(error) => Err(error).context("failed to read stored session"),
    }
}

fn clear_session(sessions: &SessionStore) {
    if let Err(error) = sessions.clear() {
        tracing::warn!(%error, "failed to clear stored session");
    }
}

//! # porter-api
//!
//! REST client for the Porter building-management backend.
//!
//! Every endpoint answers with a `{ success, message, data }` envelope (some
//! with a bare value instead); [`http::decode_envelope`] accepts both. A 401
//! on any call fires the client's unauthorized hook so callers can end the
//! session in one place. Endpoint families:
//! - auth and signup (`/api/auth`, `/api/signup`)
//! - building detail (`/api/building/detail`)
//! - issues (`/issues`)
//! - meetings and calendar (`/api/v1/meeting`)
//! - suppliers (`/api/suppliers`)
//! - finance (`/api/finance`)
//! - documents (`/api/v1/document`)

pub mod auth;
pub mod building;
pub mod documents;
pub mod finance;
pub mod issues;
pub mod meetings;
pub mod suppliers;

mod error;
pub mod http;
mod wire;

pub use auth::{Invitation, LoginResponse, NewBuilding, SignupUser};
pub use error::ApiError;
pub use issues::CreatedIssue;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use porter_config::ApiConfig;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// HTTP client for the backend. Cheap to clone; clones share the connection
/// pool, token and hook.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying `reqwest::Client`
    /// fails to build (TLS backend initialisation).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            token: None,
            on_unauthorized: None,
        })
    }

    /// Attach a bearer token to every subsequent request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Run `hook` whenever a request comes back 401. The login endpoint is
    /// exempt: a 401 there means wrong credentials.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode the envelope, firing the unauthorized hook on 401.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let result = match builder.send().await {
            Ok(resp) => http::read_data(resp).await,
            Err(e) => Err(ApiError::Network(e)),
        };
        self.observe(result)
    }

    /// Send and return the raw body bytes (document downloads).
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let result = http::read_bytes(builder).await;
        self.observe(result)
    }

    fn observe<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::Unauthorized) = &result {
            tracing::warn!("request rejected with 401; ending session");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "https://api.maple-court.example/".into(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = ApiClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), "https://api.maple-court.example");
        assert!(!client.has_token());
    }

    #[test]
    fn token_is_attached() {
        let client = ApiClient::new(&config()).unwrap().with_token("tok_1");
        let request = client
            .request(Method::GET, "/api/building/detail")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.maple-court.example/api/building/detail"
        );
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok_1"
        );
    }

    #[test]
    fn anonymous_requests_have_no_auth_header() {
        let client = ApiClient::new(&config()).unwrap();
        let request = client.request(Method::POST, "/api/auth/login").build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn hook_fires_only_on_unauthorized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let client = ApiClient::new(&config())
            .unwrap()
            .with_unauthorized_hook(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let _ = client.observe::<()>(Err(ApiError::Forbidden {
            message: String::new(),
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let _ = client.observe::<()>(Err(ApiError::Unauthorized));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_hides_token() {
        let client = ApiClient::new(&config()).unwrap().with_token("secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("authenticated: true"));
    }
}

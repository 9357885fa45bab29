//! Session persistence across "reloads" (separate store instances on the same file).

use base64::Engine as _;
use porter_auth::{AuthError, AuthSession, SessionStore, logout, resolve_session};
use porter_core::entities::AuthUser;

fn jwt_with_exp(exp: i64) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256"}"#),
        engine.encode(format!(r#"{{"sub":"17","exp":{exp}}}"#)),
        engine.encode("sig"),
    )
}

fn env_token_set() -> bool {
    std::env::var("PORTER_AUTH__TOKEN").is_ok_and(|t| !t.is_empty())
}

#[test]
fn session_survives_a_new_store_instance() {
    if env_token_set() {
        eprintln!("SKIP: PORTER_AUTH__TOKEN overrides the file tier");
        return;
    }
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let path = tmp.path().join("session.json");

    let token = jwt_with_exp(chrono::Utc::now().timestamp() + 3600);
    let user = AuthUser {
        id: "17".into(),
        email: "tom@maple-court.example".into(),
        name: None,
        role: None,
        building_id: Some(3),
    };
    SessionStore::file_only(&path)
        .store(&AuthSession::new(token.clone(), Some(user)))
        .expect("store");

    let reloaded = resolve_session(&SessionStore::file_only(&path))
        .expect("resolve")
        .expect("session present");
    assert_eq!(reloaded.token, token);
    assert_eq!(reloaded.building_id(), Some(3));
}

#[test]
fn expired_session_is_cleared() {
    if env_token_set() {
        eprintln!("SKIP: PORTER_AUTH__TOKEN overrides the file tier");
        return;
    }
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    store
        .store(&AuthSession::new(
            jwt_with_exp(chrono::Utc::now().timestamp() - 5),
            None,
        ))
        .expect("store");

    let err = resolve_session(&store).expect_err("expired token");
    assert!(matches!(err, AuthError::TokenExpired));
    assert!(!store.path().exists());
}

#[test]
fn logout_removes_session() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    store.store(&AuthSession::new("opaque", None)).expect("store");
    logout(&store).expect("logout");
    assert!(!store.path().exists());
    if !env_token_set() {
        assert!(resolve_session(&store).expect("resolve").is_none());
    }
}

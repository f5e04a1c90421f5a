use super::*;
use crate::models::UserRole;
use crate::session::{Route, resolve_route};

fn auth_context() -> AuthContext {
    AuthContext::new(
        "token-1",
        User::new("doc@example.com", "Dr. Meier").with_role(UserRole::Admin),
    )
}

#[tokio::test]
async fn test_save_load_clear() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = FileSession::new(dir.path().join("nested").join("session.json"));

    assert_eq!(store.load().await.unwrap(), None);

    store.save(&auth_context()).await.expect("failed to save");
    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["access_token"], "token-1");
    assert_eq!(value["user"]["email"], "doc@example.com");
    assert_eq!(value["user"]["role"], "Admin");

    let loaded = store.load().await.unwrap().expect("session should exist");
    assert_eq!(loaded, auth_context());

    store.clear().await.expect("failed to clear");
    assert_eq!(store.load().await.unwrap(), None);
    // Clearing twice is fine
    store.clear().await.expect("failed to clear again");
}

#[tokio::test]
async fn test_load_without_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"user": {"email": "doc@example.com", "name": "Dr. Meier"}}"#,
    )
    .unwrap();

    let store = FileSession::new(&path);
    assert_eq!(store.load().await.unwrap(), None);

    std::fs::write(&path, "not json").unwrap();
    assert_eq!(store.load().await.unwrap(), None);
}

#[test]
fn test_resolve_route() {
    assert_eq!(resolve_route(None), Route::Login);
    assert_eq!(resolve_route(Some(&auth_context())), Route::Dashboard);

    let empty = AuthContext::new("", User::new("a@b.c", "A"));
    assert_eq!(resolve_route(Some(&empty)), Route::Login);
}

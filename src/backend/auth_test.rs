use mockito::Matcher;
use serde_json::json;

use super::*;

#[tokio::test]
async fn test_login_admin() {
    let mut server = mockito::Server::new_async().await;
    let handler = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({
            "Email": "doc@example.com",
            "Password": "secret",
            "LoginType": "0"
        })))
        .with_status(200)
        .with_body(
            json!({
                "AccessToken": "token-1",
                "user": {"Email": "doc@example.com", "Name": "Dr. Meier", "UserType": 1}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let ctx = auth
        .login("doc@example.com", "secret")
        .await
        .expect("login should succeed");

    assert_eq!(ctx.access_token(), "token-1");
    assert_eq!(ctx.email(), "doc@example.com");
    assert_eq!(ctx.user().display_name(), "Dr. Meier");
    assert_eq!(ctx.user().role(), UserRole::Admin);
    handler.assert_async().await;
}

#[tokio::test]
async fn test_login_basic_user_type_as_string() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(
            json!({
                "AccessToken": "token-2",
                "user": {"Email": "nurse@example.com", "Name": "Anna", "UserType": "2"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let ctx = auth.login("nurse@example.com", "pw").await.unwrap();
    assert_eq!(ctx.user().role(), UserRole::Basic);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(json!({"message": "unauthorized"}).to_string())
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let err = auth.login("doc@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid credentials. Please try again.");
}

#[tokio::test]
async fn test_login_server_error_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let err = auth.login("doc@example.com", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::Unavailable("HTTP 502".to_string()));
    assert_eq!(err.to_string(), "Login failed. Please try again later.");
}

#[tokio::test]
async fn test_login_proxy_page_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(404)
        .with_body("<html>Not Found</html>")
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let err = auth.login("doc@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Unavailable(_)));
}

#[test]
fn test_rejection() {
    use reqwest::StatusCode;

    assert_eq!(
        rejection(StatusCode::UNAUTHORIZED, ""),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        rejection(StatusCode::BAD_REQUEST, r#"{"message":"bad password"}"#),
        AuthError::InvalidCredentials
    );
    assert!(matches!(
        rejection(StatusCode::SERVICE_UNAVAILABLE, r#"{"message":"down"}"#),
        AuthError::Unavailable(_)
    ));
    assert!(matches!(
        rejection(StatusCode::FOUND, ""),
        AuthError::Unavailable(_)
    ));
}

#[tokio::test]
async fn test_login_without_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(json!({"user": null}).to_string())
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let err = auth.login("doc@example.com", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let auth = AuthClient::default().with_endpoint(&server.url());
    let err = auth.login("doc@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Unavailable(_)));
    assert_eq!(err.to_string(), "Login failed. Please try again later.");
}

//! End-to-end tests: the session client against a live server

mod common;

use std::net::TcpListener;
use std::sync::Arc;

use tk_api::run;
use tk_core::domain::entities::user::UserProfile;
use tk_core::domain::value_objects::{LoginCredentials, RegisterData};
use tk_core::errors::ClientError;
use tk_core::services::session::{
    MemorySessionStore, SessionController, SessionStatus, SessionStore,
};
use tk_infra::{ApiClient, FileSessionStore, HttpAuthGateway};
use tk_shared::config::CorsConfig;

use common::{test_context, TestContext};

/// Serve a fresh app on an ephemeral port, returning its `/api` base URL
fn spawn_server() -> (String, TestContext) {
    let ctx = test_context();
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = run(listener, ctx.state.clone(), CorsConfig::default(), 1)
        .expect("Failed to start server");
    actix_web::rt::spawn(server);

    (format!("http://127.0.0.1:{}/api", port), ctx)
}

#[derive(Debug, serde::Deserialize)]
struct MeResponse {
    user: UserProfile,
}

#[actix_web::test]
async fn test_register_logout_login_cycle() {
    let (base_url, _ctx) = spawn_server();
    let store = Arc::new(MemorySessionStore::new());
    let session = SessionController::new(Arc::new(HttpAuthGateway::new(&base_url)), store.clone());

    assert_eq!(session.restore().await, SessionStatus::Unauthenticated);

    let user = session
        .register(RegisterData::new("Ada", "ada@example.com", "correct horse"))
        .await
        .unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert!(session.is_authenticated().await);
    assert_eq!(store.load().await.unwrap().unwrap().user, user);

    session.logout().await;
    assert_eq!(session.status().await, SessionStatus::Unauthenticated);
    assert!(store.load().await.unwrap().is_none());

    let again = session
        .login(LoginCredentials::new("ada@example.com", "correct horse"))
        .await
        .unwrap();
    assert_eq!(again, user);
}

#[actix_web::test]
async fn test_failed_login_keeps_client_unauthenticated() {
    let (base_url, _ctx) = spawn_server();
    let session = SessionController::new(
        Arc::new(HttpAuthGateway::new(&base_url)),
        Arc::new(MemorySessionStore::new()),
    );

    let err = session
        .login(LoginCredentials::new("nobody@example.com", "pw"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(session.status().await, SessionStatus::Unauthenticated);
}

#[actix_web::test]
async fn test_duplicate_registration_surfaces_server_message() {
    let (base_url, _ctx) = spawn_server();
    let session = SessionController::new(
        Arc::new(HttpAuthGateway::new(&base_url)),
        Arc::new(MemorySessionStore::new()),
    );

    session
        .register(RegisterData::new("Ada", "ada@example.com", "pw"))
        .await
        .unwrap();
    let err = session
        .register(RegisterData::new("Ada", "ada@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(err.to_string(), "Email already in use");
    assert!(session.is_authenticated().await);
}

#[actix_web::test]
async fn test_restore_from_file_across_restarts() {
    let (base_url, ctx) = spawn_server();
    let path = std::env::temp_dir().join(format!("ticklist-session-{}.json", uuid::Uuid::new_v4()));

    let first = SessionController::new(
        Arc::new(HttpAuthGateway::new(&base_url)),
        Arc::new(FileSessionStore::new(&path)),
    );
    let user = first
        .register(RegisterData::new("Ada", "ada@example.com", "pw"))
        .await
        .unwrap();
    let first_token = first.token().await.unwrap();

    ctx.clock.advance(30);

    let second = SessionController::new(
        Arc::new(HttpAuthGateway::new(&base_url)),
        Arc::new(FileSessionStore::new(&path)),
    );
    assert_eq!(second.restore().await, SessionStatus::Authenticated);
    assert_eq!(second.current_user().await, Some(user));

    let second_token = second.token().await.unwrap();
    assert_ne!(second_token, first_token);

    let stored = FileSessionStore::new(&path).load().await.unwrap().unwrap();
    assert_eq!(stored.token, second_token);

    second.logout().await;
    assert!(!path.exists());
}

#[actix_web::test]
async fn test_restore_discards_rejected_session() {
    let (base_url, _ctx) = spawn_server();
    let store = Arc::new(MemorySessionStore::with_session(
        tk_core::services::session::StoredSession {
            token: "forged.token.value".to_string(),
            user: UserProfile {
                id: "1".to_string(),
                name: "Mallory".to_string(),
                email: "mallory@example.com".to_string(),
                created_at: None,
            },
        },
    ));
    let session = SessionController::new(Arc::new(HttpAuthGateway::new(&base_url)), store.clone());

    assert_eq!(session.restore().await, SessionStatus::Unauthenticated);
    assert!(session.current_user().await.is_none());
    assert!(store.load().await.unwrap().is_none());
}

#[actix_web::test]
async fn test_api_client_sends_stored_credential() {
    let (base_url, _ctx) = spawn_server();
    let store = Arc::new(MemorySessionStore::new());
    let session = SessionController::new(Arc::new(HttpAuthGateway::new(&base_url)), store.clone());
    let client = ApiClient::new(&base_url, store.clone());

    let err = client.get::<MeResponse>("/auth/me").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(err.to_string(), "Unauthorized: No Authorization header");

    let user = session
        .register(RegisterData::new("Ada", "ada@example.com", "pw"))
        .await
        .unwrap();

    let me: MeResponse = client.get("/auth/me").await.unwrap();
    assert_eq!(me.user, user);
}

#[actix_web::test]
async fn test_unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let session = SessionController::new(
        Arc::new(HttpAuthGateway::new(format!("http://127.0.0.1:{}/api", port))),
        Arc::new(MemorySessionStore::new()),
    );

    let err = session
        .login(LoginCredentials::new("ada@example.com", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

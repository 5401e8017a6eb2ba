//! Integration tests for the bearer authentication on `/api/auth/me`

mod common;

use actix_web::{
    http::{header, StatusCode},
    test,
};
use serde_json::Value;

use common::{ada_registration, test_context, TEST_TTL_SECONDS};
use tk_api::create_app;
use tk_shared::config::CorsConfig;

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app($ctx.state.clone(), &CorsConfig::default())).await
    };
}

macro_rules! registered_token {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(ada_registration())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&$app, req).await).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

fn me_request(authorization: Option<String>) -> test::TestRequest {
    let req = test::TestRequest::get().uri("/api/auth/me");
    match authorization {
        Some(value) => req.insert_header((header::AUTHORIZATION, value)),
        None => req,
    }
}

macro_rules! rejection {
    ($app:expr, $authorization:expr) => {{
        let resp = test::call_service(&$app, me_request($authorization).to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_missing_header() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let (status, body) = rejection!(app, None);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Unauthorized: No Authorization header");
}

#[actix_web::test]
async fn test_wrong_scheme() {
    let ctx = test_context();
    let app = init_app!(ctx);
    let token = registered_token!(app);

    let (status, body) = rejection!(app, Some(format!("Basic {}", token)));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Invalid Authorization format");
}

#[actix_web::test]
async fn test_expired_token() {
    let ctx = test_context();
    let app = init_app!(ctx);
    let token = registered_token!(app);

    ctx.clock.advance(TEST_TTL_SECONDS + 1);

    let (status, body) = rejection!(app, Some(format!("Bearer {}", token)));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Unauthorized: Token has expired");
}

#[actix_web::test]
async fn test_token_valid_until_its_expiry_second() {
    let ctx = test_context();
    let app = init_app!(ctx);
    let token = registered_token!(app);

    ctx.clock.advance(TEST_TTL_SECONDS);

    let resp = test::call_service(&app, me_request(Some(format!("Bearer {}", token))).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_tampered_signature() {
    let ctx = test_context();
    let app = init_app!(ctx);
    let token = registered_token!(app);

    let (head, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

    let (status, body) = rejection!(app, Some(format!("Bearer {}", tampered)));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Unauthorized: Invalid signature");
}

#[actix_web::test]
async fn test_malformed_token() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let (status, body) = rejection!(app, Some("Bearer only.two".to_string()));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Invalid token format");
}

#[actix_web::test]
async fn test_cors_preflight() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/auth/login")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

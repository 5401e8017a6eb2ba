//! CORS middleware configuration for cross-origin requests.
//!
//! The browser client is served from a different origin than the API, so
//! the API answers preflight requests itself.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use tk_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// With no configured origins (or `*`) any origin is accepted; otherwise only
/// the listed origins are.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        info!("Configuring CORS for any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Service;
    use actix_web::http::header::HeaderMap;
    use actix_web::{test, web, App, HttpResponse};

    /// Response headers of a preflight, `None` when the origin is refused
    async fn preflight(config: CorsConfig, origin: &str) -> Option<HeaderMap> {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
            .to_request();

        match app.call(req).await {
            Ok(resp) if resp.status().is_success() => Some(resp.headers().clone()),
            _ => None,
        }
    }

    #[actix_web::test]
    async fn test_any_origin_by_default() {
        let headers = preflight(CorsConfig::default(), "http://localhost:5173")
            .await
            .expect("preflight should be accepted");

        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "{} missing from {}", method, methods);
        }
    }

    #[actix_web::test]
    async fn test_restricted_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_string()],
            ..CorsConfig::default()
        };

        let allowed = preflight(config.clone(), "https://app.example.com").await;
        assert!(allowed
            .map(|headers| headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN))
            .unwrap_or(false));

        let denied = preflight(config, "https://evil.example.com").await;
        assert!(denied
            .map(|headers| !headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN))
            .unwrap_or(true));
    }
}

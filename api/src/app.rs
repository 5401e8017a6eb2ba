//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpServer,
};
use tracing::info;
use tracing_actix_web::TracingLogger;

use tk_core::repositories::UserRepository;
use tk_core::services::auth::{AuthService, AuthServiceConfig};
use tk_core::services::token::TokenService;
use tk_shared::config::CorsConfig;

use crate::handlers::{json_error_handler, method_not_allowed, not_found};
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{auth, health};

/// Shared application state for the route handlers
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            Arc::clone(&token_service),
            config,
        ));

        Self {
            auth_service,
            token_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service = web::Data::from(Arc::clone(&state.token_service));

    App::new()
        .app_data(state)
        .app_data(token_service)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .wrap(create_cors(cors))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/auth")
                .service(
                    web::resource("/login")
                        .route(web::post().to(auth::login))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/register")
                        .route(web::post().to(auth::register))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/refresh")
                        .route(web::post().to(auth::refresh))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/logout")
                        .route(web::post().to(auth::logout))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/me")
                        .route(web::get().to(auth::me).wrap(JwtAuth))
                        .default_service(web::to(method_not_allowed)),
                ),
        )
        .default_service(web::to(not_found))
}

/// Start serving on an already bound listener
///
/// `workers` of 0 keeps actix-web's default of one worker per core.
pub fn run(
    listener: TcpListener,
    state: web::Data<AppState>,
    cors: CorsConfig,
    workers: usize,
) -> std::io::Result<Server> {
    let address = listener.local_addr()?;

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if workers > 0 {
        server = server.workers(workers);
    }

    let server = server.listen(listener)?.run();
    info!(%address, "HTTP server listening");
    Ok(server)
}

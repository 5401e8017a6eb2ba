use std::net::TcpListener;
use std::sync::Arc;

use actix_web::web;
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tk_api::{run, AppState};
use tk_core::repositories::UserRepository;
use tk_core::services::auth::AuthServiceConfig;
use tk_core::services::token::{TokenService, TokenServiceConfig};
use tk_infra::{DatabasePool, InMemoryUserRepository, MySqlUserRepository};
use tk_shared::config::{AppConfig, DatabaseConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ticklist API Server");

    let config = AppConfig::load().context("Failed to load configuration")?;

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, signing credentials with the built-in development secret");
    }

    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
            .context("Failed to create token service")?,
    );

    let user_repository = create_user_repository(&config.database).await?;

    let state = web::Data::new(AppState::new(
        user_repository,
        token_service,
        AuthServiceConfig::from(&config.auth),
    ));

    let bind_address = config.server.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    run(listener, state, config.cors.clone(), config.server.workers)?.await?;

    info!("Server stopped");
    Ok(())
}

async fn create_user_repository(
    config: &DatabaseConfig,
) -> anyhow::Result<Arc<dyn UserRepository>> {
    if config.url.is_none() {
        warn!("DATABASE_URL is not set, accounts are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }

    let pool = DatabasePool::new(config)
        .await
        .context("Failed to connect to database")?;
    if !pool
        .health_check()
        .await
        .context("Database health check failed")?
    {
        anyhow::bail!("Database health check returned an unexpected value");
    }
    info!(pool = %pool.statistics(), "Database connected");

    let repository = MySqlUserRepository::new(pool.pool().clone());
    repository
        .ensure_schema()
        .await
        .context("Failed to prepare users table")?;

    Ok(Arc::new(repository))
}

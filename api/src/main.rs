use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use tm_api::app::configure_routes;
use tm_api::middleware::auth::TokenVerifier;
use tm_api::middleware::cors::create_cors;
use tm_api::routes::auth::AppState;

use tm_core::services::auth::AuthService;
use tm_core::services::token::{TokenService, TokenServiceConfig};
use tm_infra::cache::{RedisClient, RedisRevocationLedger};
use tm_infra::database::{create_pool, ensure_schema, MySqlUserRepository};
use tm_shared::config::{CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting TextMill auth service");

    // Refusing to start without a real secret beats signing tokens with a
    // default one.
    let jwt_config = JwtConfig::from_env().context("JWT configuration")?;
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let pool = create_pool(&database_config)
        .await
        .context("MySQL connection")?;
    ensure_schema(&pool).await.context("database schema")?;

    let redis_client = RedisClient::new(&cache_config)
        .await
        .context("Redis connection")?;
    let mut ledger = RedisRevocationLedger::new(redis_client);
    if let Some(prefix) = cache_config.key_prefix.clone() {
        ledger = ledger.with_key_prefix(prefix);
    }
    let ledger = Arc::new(ledger);

    let token_service = Arc::new(
        TokenService::new(ledger, TokenServiceConfig::from(&jwt_config))
            .context("token service")?,
    );
    let user_repository = Arc::new(MySqlUserRepository::new(pool));
    let auth_service = Arc::new(AuthService::new(user_repository, token_service.clone()));

    let app_state = web::Data::new(AppState::new(auth_service));
    let verifier: Arc<dyn TokenVerifier> = token_service;
    let verifier = web::Data::new(verifier);

    let bind_address = server_config.bind_address();
    info!("Listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(verifier.clone())
            .wrap(TracingLogger::default())
            .wrap(create_cors())
            .configure(configure_routes::<MySqlUserRepository, RedisRevocationLedger>)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

//! Server setup and initialization
//!
//! Picks the document store backend and the change event route from
//! configuration:
//!
//! * embedded triggers: the store publishes into an in-process feed that a
//!   trigger worker inside this process consumes;
//! * otherwise: the store publishes to Redis for the standalone worker.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use social_cache::{LocalChangeFeed, Publisher, RedisPool, SharedRedisPool};
use social_common::{AppConfig, AppError, JwtService, StoreBackend};
use social_core::traits::{ChangePublisher, DocumentStore};
use social_db::{create_pool, MemoryDocumentStore, PgDocumentStore};
use social_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` if the middleware settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(api.merge(health_routes()).with_state(state))
}

async fn create_store(
    config: &AppConfig,
    publisher: Arc<dyn ChangePublisher>,
) -> Result<Arc<dyn DocumentStore>, AppError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new().with_publisher(publisher)))
        }
        StoreBackend::Postgres => {
            let database = config
                .store
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&social_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let store = PgDocumentStore::new(pool).with_publisher(publisher);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}

/// Initialize all dependencies and create AppState
///
/// With embedded triggers this also starts the trigger worker.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let redis_pool: Option<SharedRedisPool> = match &config.redis {
        Some(redis) if !config.embedded_triggers() => {
            info!("Connecting to Redis...");
            let pool =
                RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            Some(Arc::new(pool))
        }
        _ => None,
    };

    let store = match &redis_pool {
        Some(pool) => {
            let publisher = Arc::new(Publisher::new(pool.as_ref().clone()));
            create_store(&config, publisher).await?
        }
        None => {
            let feed = LocalChangeFeed::default();
            let store = create_store(&config, Arc::new(feed.clone())).await?;
            social_triggers::spawn_embedded(
                store.clone(),
                &feed,
                Duration::from_secs(config.triggers.dedup_ttl_secs),
            );
            store
        }
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));
    let service_context = ServiceContext::from_store(store, jwt_service)
        .with_default_image_url(config.users.default_image_url.clone());

    Ok(AppState::new(service_context, config, redis_pool))
}

/// Serve `app` on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

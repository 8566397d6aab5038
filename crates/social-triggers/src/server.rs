//! Standalone trigger worker
//!
//! Subscribes to change events on Redis, runs the dispatcher over them and
//! serves a small health endpoint with dispatcher counters.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use social_cache::{PubSubChannel, Publisher, RedisPool, SubscriberBuilder};
use social_common::{AppConfig, StoreBackend};
use social_core::DomainError;
use social_db::PgDocumentStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::dispatcher::{DispatcherStats, TriggerDispatcher};
use crate::error::{TriggerError, TriggerResult};
use crate::worker;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    triggers: DispatcherStats,
}

#[derive(Clone)]
struct HealthState {
    dispatcher: Arc<TriggerDispatcher>,
    worker: Arc<JoinHandle<()>>,
}

async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthBody>) {
    // The worker loop only returns when its change source is gone
    let (code, status) = if state.worker.is_finished() {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    } else {
        (StatusCode::OK, "healthy")
    };

    (
        code,
        Json(HealthBody {
            status,
            triggers: state.dispatcher.stats(),
        }),
    )
}

/// Health routes over a dispatcher and the task consuming changes for it
pub fn create_router(dispatcher: Arc<TriggerDispatcher>, worker: JoinHandle<()>) -> Router {
    Router::new()
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(HealthState {
            dispatcher,
            worker: Arc::new(worker),
        })
}

/// Run the standalone worker with configuration
///
/// Needs the Postgres backend and Redis: the memory store only exists
/// inside the API process, which runs its triggers embedded.
pub async fn run(config: AppConfig) -> TriggerResult<()> {
    if config.store.backend != StoreBackend::Postgres {
        return Err(TriggerError::Config(
            "the standalone worker needs STORE_BACKEND=postgres".to_string(),
        ));
    }
    let database = config
        .store
        .database
        .as_ref()
        .ok_or_else(|| TriggerError::Config("DATABASE_URL is not set".to_string()))?;
    let redis = config
        .redis
        .as_ref()
        .ok_or_else(|| TriggerError::Config("REDIS_URL is not set".to_string()))?;

    tracing::info!("Connecting to PostgreSQL...");
    let pool = social_db::create_pool(&social_db::DatabaseConfig::from(database))
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

    // Writes made by triggers are published too, so cascades can chain
    let redis_pool = RedisPool::from_config(redis)?;
    let store = PgDocumentStore::new(pool).with_publisher(Arc::new(Publisher::new(redis_pool)));
    store.ensure_schema().await?;

    tracing::info!("Subscribing to change events...");
    let subscriber = SubscriberBuilder::new()
        .redis_url(&redis.url)
        .subscribe_all(PubSubChannel::all_documents())
        .build()
        .await?;

    let dispatcher = Arc::new(TriggerDispatcher::new(
        Arc::new(store),
        Duration::from_secs(config.triggers.dedup_ttl_secs),
    ));
    let worker = tokio::spawn(worker::run_redis(dispatcher.clone(), subscriber));
    tracing::info!("Trigger worker started");

    let addr = config.triggers.server.address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Trigger health endpoint on http://{}/health", addr);

    axum::serve(listener, create_router(dispatcher, worker)).await?;
    Ok(())
}

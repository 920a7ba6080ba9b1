use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::KeyValueStore;
use crate::domain::services::booking_service::BookingService;
use crate::error::AppError;
use crate::state::AppState;
use crate::infra::repositories::{
    kv_availability_repo::KvAvailabilityRepo, kv_booking_repo::KvBookingRepo, kv_user_repo::KvUserRepo,
    seed_defaults,
};
use crate::infra::stores::{memory_store::MemoryStore, session_registry::SessionRegistry, sqlite_store::SqliteStore};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let store: Arc<dyn KeyValueStore> = if config.uses_memory_store() {
        info!("Using in-memory store; data is lost when the process exits");
        Arc::new(MemoryStore::new())
    } else {
        info!("Initializing SQLite key-value store with WAL Mode...");
        let pool = connect_sqlite(&config.database_url).await?;
        let store = SqliteStore::new(pool);
        store.migrate().await?;
        Arc::new(store)
    };

    build_state(config.clone(), store).await
}

/// Wires repositories and services over an already opened persistent store.
pub async fn build_state(config: Config, store: Arc<dyn KeyValueStore>) -> Result<AppState, AppError> {
    seed_defaults(store.as_ref()).await?;

    let user_repo = Arc::new(KvUserRepo::new(store.clone()));
    let booking_repo = Arc::new(KvBookingRepo::new(store.clone()));
    let availability_repo = Arc::new(KvAvailabilityRepo::new(store.clone()));

    let booking_service = Arc::new(BookingService::new(
        user_repo.clone(),
        booking_repo,
        availability_repo,
    ));

    Ok(AppState {
        config,
        user_repo,
        booking_service,
        sessions: Arc::new(SessionRegistry::new()),
    })
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::api::{app, AppState};
use crate::config::{self, StoreBackend};
use crate::database::repository::{finish, Store, UserRepository};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, PgStore};

pub async fn handle(store: Option<StoreBackend>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    let backend = store.unwrap_or(config.store.backend);
    let addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));

    info!("Starting Todo API in {:?} mode with {} store", config.environment, backend);

    match backend {
        StoreBackend::Memory => {
            let store = MemoryStore::new();
            seed_users(&store, &config.store.seed_users).await?;
            serve(store, &addr, config.server.enable_cors).await
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            DatabaseManager::migrate(&pool).await?;

            let store = PgStore::new(pool.clone());
            seed_users(&store, &config.store.seed_users).await?;
            let served = serve(store, &addr, config.server.enable_cors).await;

            DatabaseManager::close(&pool).await;
            served
        }
    }
}

/// Create each `(id, secret)` pair, leaving users that already exist untouched
pub async fn seed_users<S: Store>(store: &S, users: &[(String, String)]) -> anyhow::Result<()> {
    let repo = store.users();
    for (id, secret) in users {
        let mut cx = store.begin().await?;
        let result = repo.create(&mut cx, id, secret).await;
        match finish(cx, result).await {
            Ok(()) => info!("Seeded user '{}'", id),
            Err(DatabaseError::Conflict(_)) => debug!("User '{}' already exists, not seeding", id),
            Err(e) => return Err(e).with_context(|| format!("failed to seed user '{}'", id)),
        }
    }
    Ok(())
}

async fn serve<S: Store>(store: S, addr: &str, enable_cors: bool) -> anyhow::Result<()> {
    let app = app(AppState::new(store), enable_cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Todo API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

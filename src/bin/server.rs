//! Programmer API server: reads config from the environment (and `.env`), picks
//! PostgreSQL when `DATABASE_URL` is set and the in-memory store otherwise, then serves.

use programmer_api::{
    app, ensure_database_exists, ensure_schema, AppConfig, AppState, MemoryStore, PgProgrammerStore,
    ProgrammerStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("programmer_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn ProgrammerStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_schema(&pool, &config.default_owner).await?;
            tracing::info!("using PostgreSQL store");
            Arc::new(PgProgrammerStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, programmers are kept in memory");
            Arc::new(MemoryStore::with_user(&config.default_owner))
        }
    };

    let state = AppState::new(store, config.default_owner.clone(), config.problem_settings());
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(debug = config.debug, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

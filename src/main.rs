//! Server binary: loads configuration, picks the store, prepares the schema and serves the router.

use content_admin::{app, apply_migrations, seed_settings, AppConfig, AppState, MemoryStore, PgStore};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("content_admin=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            apply_migrations(&pool).await?;
            tracing::info!("using PostgreSQL store");
            AppState::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::new(MemoryStore::new())
        }
    };

    if config.seed_settings {
        seed_settings(state.store.as_ref()).await?;
    }

    let router = app(state, &config.route_prefix)
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use tandem_api::single;
use tandem_api::state::{AppState, AppStateInner};
use tandem_core::SingleChatService;
use tandem_db::SqliteSingleStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tandem=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("TANDEM_DB_PATH").unwrap_or_else(|_| "tandem.db".into());
    let host = std::env::var("TANDEM_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TANDEM_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let store_timeout_secs: u64 = std::env::var("TANDEM_STORE_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".into())
        .parse()?;

    // Init database and services
    let db = Arc::new(tandem_db::Database::open(&PathBuf::from(&db_path))?);
    let chats = SingleChatService::with_timeout(
        Arc::new(SqliteSingleStore::new(db)),
        Duration::from_secs(store_timeout_secs),
    );

    let state: AppState = Arc::new(AppStateInner { chats });

    // Routes
    let app = Router::new()
        .route("/single/invite", post(single::invite))
        .route("/single/accept", patch(single::accept))
        .route("/single/nickname", patch(single::update_nickname))
        .route("/single/disturb", patch(single::update_disturb))
        .route("/single/detail", get(single::detail))
        .route("/single", delete(single::remove))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("tandem server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

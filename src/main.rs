// src/main.rs
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod app;
mod common;
mod logging_middleware;
mod security_middleware;
mod sessions;
mod snippets;
mod templates;
mod users;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::config::{apply_cli_override, Config, SessionStoreKind};
use common::AppState;
use sessions::{MemorySessionStore, SessionManager, SessionStore, SqliteSessionStore};
use snippets::SnippetsService;
use users::UsersService;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    let config = apply_cli_override(Config::from_env());
    info!(
        addr = %config.addr,
        static_dir = %config.static_dir.display(),
        session_store = ?config.session_store,
        "Configuration loaded"
    );

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let session_store: Arc<dyn SessionStore> = match config.session_store {
        SessionStoreKind::Sqlite => {
            let store = SqliteSessionStore::new(pool.clone());
            store.start_cleanup_task(Duration::from_secs(5 * 60));
            info!("SqliteSessionStore initialized");
            Arc::new(store)
        }
        SessionStoreKind::Memory => {
            info!("MemorySessionStore initialized");
            Arc::new(MemorySessionStore::new())
        }
    };

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        snippets: Arc::new(SnippetsService::new(pool.clone())),
        users: Arc::new(UsersService::new(pool)),
        sessions: SessionManager::new(session_store, config.session_lifetime),
    };

    let app = app::build_router(Arc::new(app_state), &config.static_dir);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    // Accept the ":4000" shorthand for all interfaces
    let addr = match config.addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => config.addr.clone(),
    };
    let addr = SocketAddr::from_str(&addr)?;

    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

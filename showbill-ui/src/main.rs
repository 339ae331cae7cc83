//! showbill-ui - Venue/artist/show booking directory
//!
//! Serves the browsing UI and the JSON view models behind it: venues grouped
//! by area, name search, per-entity detail pages with past/upcoming show
//! partitions, and the create/edit/delete endpoints.

use anyhow::Result;
use clap::Parser;
use showbill_common::config;
use showbill_common::db::init_database;
use showbill_ui::{build_router, AppState};
use tracing::{error, info};

/// Default listen port
const DEFAULT_PORT: u16 = 5730;

#[derive(Debug, Parser)]
#[command(name = "showbill-ui", about = "Showbill booking directory server")]
struct Cli {
    /// Root folder holding the database (overrides SHOWBILL_ROOT and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Showbill (showbill-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref());
    config::ensure_root_exists(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    // Create application state and router
    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("showbill-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

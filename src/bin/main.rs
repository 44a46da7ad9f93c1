use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

use ojt_monitoring::bootstrap::initialize_admin_user;
use ojt_monitoring::config::{Config, REQUIREMENT_UPLOAD_DIR};
use ojt_monitoring::session::build_session_store;
use ojt_monitoring::state::AppState;
use ojt_monitoring::{app, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    tracing::info!("Starting application...");

    let upload_dir = Path::new(&config.storage_root).join(REQUIREMENT_UPLOAD_DIR);
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .with_context(|| format!("Failed to create upload folder {}", upload_dir.display()))?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection established");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    let sessions = build_session_store(&config).await?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(&db, &config).await {
        tracing::error!("Failed to initialize admin user: {:#}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let http_address = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(db, config, sessions);
    let app = app::create_app(state);

    tracing::info!("HTTP server listening on {}", &http_address);
    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")?;

    Ok(())
}

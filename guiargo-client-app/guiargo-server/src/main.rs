use anyhow::Context;
use std::net::SocketAddr;
use tracing::{info, warn};

use guiargo_api::{build_router, views::Views, AppState};
use guiargo_infrastructure::{create_pool, run_migrations};
use guiargo_shared::config::AppConfig;
use guiargo_shared::telemetry::init_telemetry;
use guiargo_shared::utils::mask_email;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env, config/*.toml, APP__*)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the log file on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!("Guiargo panel starting ({})...", config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    info!("Database connection established.");

    let views = Views::new().map_err(|e| anyhow::anyhow!("Invalid template: {}", e))?;
    let bootstrap = config.bootstrap.clone();
    let addr = SocketAddr::from((
        config.app.host.parse::<std::net::IpAddr>()?,
        config.app.port,
    ));

    // Create App State
    let state = AppState::new(pool, config, views);

    // First administrator
    match bootstrap.admin_credentials() {
        Some((username, email, password)) => {
            if let Some(admin) = state.users.ensure_bootstrap_admin(username, email, password).await? {
                info!("Bootstrap admin {} created ({})", admin.username, mask_email(&admin.email));
            }
        }
        None => info!("No bootstrap admin configured"),
    }

    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Guiargo panel stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

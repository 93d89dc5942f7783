use idm_auth::{TokenIssuer, TokenValidator};
use idm_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = idm_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = idm_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting idm-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = idm_db::connect(&database_path).await?;

    info!("Database connection established");

    info!("Running database migrations...");
    idm_db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    // The signing secret is read once here and immutable afterwards
    let Some(ref secret) = config.auth.jwt_secret else {
        unreachable!("validate() ensures auth.jwt_secret is set")
    };

    let state = AppState {
        pool,
        validator: Arc::new(TokenValidator::with_hs256(secret.as_bytes())),
        issuer: Arc::new(TokenIssuer::with_hs256(
            secret.as_bytes(),
            config.auth.token_ttl_secs,
        )),
    };

    // Build router
    let app = build_router(state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for SIGINT: {}", e);
                return;
            }
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

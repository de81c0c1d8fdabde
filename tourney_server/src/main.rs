//! Esports tournament API server.
//!
//! Serves the tournament REST API over a MongoDB-backed document store. The
//! server still starts when no database is configured; store-backed routes
//! then answer with "Database not configured".

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;
use tourney::{
    TournamentManager,
    db::{Database, DatabaseConfig, DocumentStore},
};
use tourney_server::{api, config::ServerConfig, logging, metrics};
use tracing::{error, info, warn};

const HELP: &str = "\
Run the esports tournament API server

USAGE:
  tourney_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 0.0.0.0:$PORT]
  --db-url     URL         MongoDB connection string   [default: env DATABASE_URL]
  --db-name    NAME        MongoDB database name       [default: env DATABASE_NAME]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8000)
  PORT                     Listen port when no bind address is given [default: 8000]
  DATABASE_URL             MongoDB connection string
  DATABASE_NAME            MongoDB database name
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  RUST_LOG                 Log filter
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let database_name: Option<String> = pargs.opt_value_from_str("--db-name")?;

    logging::init();

    let config = ServerConfig::from_env(bind, database_url, database_name)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported at http://{}/metrics", metrics_bind);
    }

    let database = match &config.database {
        Some(database) => connect_database(database).await,
        None => {
            warn!(
                database_url_set = config.status.database_url_set,
                database_name_set = config.status.database_name_set,
                "Database not configured; store-backed routes will fail"
            );
            None
        }
    };

    let store = database
        .as_ref()
        .map(|db| Arc::new(db.store()) as Arc<dyn DocumentStore>);

    let api_state = api::AppState {
        tournament_manager: Arc::new(TournamentManager::new(store)),
        status: config.status,
    };

    let app = api::create_router(api_state);

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    if let Some(db) = database {
        db.close().await;
    }

    Ok(())
}

/// Build the MongoDB client. A failed ping is logged but not fatal, since the
/// driver reconnects lazily.
async fn connect_database(config: &DatabaseConfig) -> Option<Database> {
    info!("Connecting to database {}", config.database_name);

    let db = match Database::new(config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to configure database client: {}", e);
            return None;
        }
    };

    match db.health_check().await {
        Ok(()) => info!("Database connected successfully"),
        Err(e) => warn!("Database ping failed, continuing: {}", e),
    }

    Some(db)
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}

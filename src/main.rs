//! Remote Sentinel
//!
//! Local daemon that detects remote-control sessions on the host:
//! - OS signal probes polled on a fixed interval
//! - Debounced session state machine
//! - Durable SQLite session history
//! - Localhost HTTP API for the desktop shell

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use api::{router, AppState};
use collector::{Collector, CollectorConfig};
use history_store::Store;
use notifier::Dispatcher;
use telemetry::{health, init_tracing_from_env};
use tracker::{DetectionLoop, TrackerConfig};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    /// Loopback by default: the API is for the local shell only.
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database path. Empty means the per-user data directory.
    #[serde(default)]
    data_path: String,

    #[serde(default)]
    collector: CollectorConfig,

    #[serde(default)]
    tracker: TrackerConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    18080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_path: String::new(),
            collector: CollectorConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl Config {
    fn database_path(&self) -> Result<PathBuf> {
        if !self.data_path.is_empty() {
            return Ok(PathBuf::from(&self.data_path));
        }

        let dir = dirs::data_dir()
            .context("No per-user data directory on this platform")?
            .join("remote-sentinel");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(dir.join("sentinel.db"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Remote Sentinel v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    // Open the durable store
    let db_path = config.database_path()?;
    let store = match Store::open(&db_path) {
        Ok(store) => {
            health().store.set_healthy();
            store
        }
        Err(e) => {
            health().store.set_unhealthy("Open failed");
            error!(path = %db_path.display(), error = %e, "Failed to open history store");
            return Err(e).context("Failed to open history store");
        }
    };

    // Shared notification dispatcher
    let dispatcher = Arc::new(Dispatcher::new());

    // Session tracker: always boots Idle, whatever the last run left behind
    let tracker = config.tracker.new_tracker();

    // Start the detection loop
    let collector = Collector::new(&config.collector);
    let _detection_handle = DetectionLoop::new(
        collector,
        tracker.clone(),
        store.clone(),
        dispatcher.clone(),
        &config.tracker,
    )
    .spawn();
    info!(
        poll_interval_secs = config.tracker.poll_interval_secs,
        debounce_secs = config.tracker.debounce_secs,
        "Detection loop running"
    );

    // Create application state
    let state = AppState::new(tracker, store, dispatcher);

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("SENTINEL")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested config from environment
    if let Ok(path) = std::env::var("SENTINEL_DATA_PATH") {
        config.data_path = path;
    }
    if let Ok(secs) = std::env::var("SENTINEL_POLL_INTERVAL_SECS") {
        if let Ok(secs) = secs.parse() {
            config.tracker.poll_interval_secs = secs;
            config.collector.poll_interval_secs = secs;
        }
    }
    if let Ok(secs) = std::env::var("SENTINEL_DEBOUNCE_SECS") {
        if let Ok(secs) = secs.parse() {
            config.tracker.debounce_secs = secs;
        }
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}

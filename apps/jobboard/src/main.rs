mod api_client;
mod config;
mod errors;
mod lifecycle;
mod models;
mod notification;
mod router;
mod session;
mod shell;
mod terminal;
mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::{ApiClient, JobBoardApi};
use crate::config::Config;
use crate::session::storage::{FileStorage, MemoryStorage, SessionStorage};
use crate::shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout belongs to the terminal UI.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting JobBoard client v{}", env!("CARGO_PKG_VERSION"));

    let storage = open_storage(&config);

    let api = ApiClient::new(config.api_base_url.clone()).context("Failed to build HTTP client")?;
    info!("API client initialized (base URL: {})", api.base_url());
    let api: Arc<dyn JobBoardApi> = Arc::new(api);

    let shell = Shell::new(storage, &config.start_route);
    terminal::run(shell, api).await
}

/// Falls back to an in-memory session if the session file cannot be opened.
fn open_storage(config: &Config) -> Box<dyn SessionStorage> {
    let Some(path) = &config.session_file else {
        info!("Session persistence disabled");
        return Box::new(MemoryStorage::new());
    };
    match FileStorage::open(path) {
        Ok(storage) => {
            info!("Session file: {}", storage.path().display());
            Box::new(storage)
        }
        Err(e) => {
            warn!("Cannot open session file {}: {e}; session will not persist", path.display());
            Box::new(MemoryStorage::new())
        }
    }
}

//! HTTP server for the time-clock engine.
//!
//! Usage: `timeclock-engine [CONFIG_PATH]`. The configuration path may also
//! be given through `TIMECLOCK_CONFIG`; without either, defaults are used.

use std::env;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use timeclock_engine::api::{create_router, AppState};
use timeclock_engine::config::ConfigLoader;

const CONFIG_ENV: &str = "TIMECLOCK_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = env::args().nth(1).or_else(|| env::var(CONFIG_ENV).ok());
    let config = match &config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::default(),
    };
    info!(
        config = config_path.as_deref().unwrap_or("<defaults>"),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let bind_address = &config.server().bind_address;
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(address = %bind_address, "Time-clock engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}

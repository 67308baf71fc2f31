use std::env;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppResult;

mod app;
mod config;
mod error;

fn start() -> AppResult<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));

    let config = AppConfig::load(&path)?;
    App::new(config)?.run()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Begin log");

    if let Err(e) = start() {
        error!("The app failed: {}", e);
        process::exit(1);
    }
}

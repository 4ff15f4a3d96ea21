//! Latch Engine Runtime
//!
//! Boots logging, opens the game window and hands the engine systems to the
//! settings store before the first frame.

mod app;
mod host;
mod player;

use anyhow::Result;
use latch_settings::StoreConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Latch Engine v{}", latch_core::VERSION);

    let event_loop = latch_render::window::create_event_loop()?;
    let mut app = app::RuntimeApp::new(StoreConfig::from_env());
    event_loop.run_app(&mut app)?;

    tracing::info!("Runtime shut down");
    Ok(())
}

/// mono3d Terminal Demo - Cranked Cube
///
/// Renders the tumbling cube into a 1-bit frame and shows it with half-block
/// characters. An optional JSON config path may be given as the only argument.
/// Controls:
///   - A/D / Left/Right: Turn the crank
///   - Space: Toggle auto-cranking
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use log::info;
use mono3d_core::{Renderer, RendererConfig};
use mono3d_terminal::TerminalApp;
use std::{env, fs};

fn load_config(path: &str) -> Result<RendererConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    RendererConfig::from_json(&json).with_context(|| format!("Invalid config file {}", path))
}

fn main() -> Result<()> {
    // Default filter is "info" if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            load_config(&path)?
        }
        None => RendererConfig::default(),
    };

    let renderer = Renderer::new(&config).context("Failed to create renderer")?;
    let geometry = renderer.geometry();
    info!(
        "Rendering {}x{} at {} Hz (press Q to quit)",
        geometry.columns(),
        geometry.rows(),
        renderer.refresh_rate()
    );

    let mut app = TerminalApp::new(renderer);
    app.run()?;

    info!("Renderer stopped");
    Ok(())
}

/// cgshapes terminal renderer
///
/// Controls:
///   - WASD / Arrow Keys: Orbit the view
///   - Space: Pause / resume animation
///   - +/-: Adjust the scene's numeric control
///   - Mouse click: Select a shape
///   - Q/ESC: Quit

use anyhow::Context;
use cgshapes_core::{build_scene, SceneConfig};
use cgshapes_terminal::cli::{CliArgs, CliOverrides};
use cgshapes_terminal::logging::init_logging;
use cgshapes_terminal::TerminalApp;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.logging_config()).context("failed to open log file")?;

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    config.apply_cli_overrides(&args);
    log::info!("starting {} with seed {}", config.scene, config.seed);

    let scene = build_scene(config.scene, &config);
    let mut app = TerminalApp::new(scene, args.projection_mode()).context("terminal unavailable")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}

//! Headless entry point: replay a UI action script and export the result.

use clap::Parser;
use inkpad_app::{App, AppConfig, AppError, ShortcutRegistry, UiAction};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inkpad", about = "Replay an InkPad action script and export a PNG snapshot")]
struct Cli {
    /// JSON file containing an array of UI actions.
    script: PathBuf,

    /// Where to write the exported PNG.
    output: PathBuf,

    /// Optional JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the export width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Override the export height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Print keyboard shortcuts before running.
    #[arg(long)]
    shortcuts: bool,
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.shortcuts {
        ShortcutRegistry::print_all();
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(width) = cli.width {
        config.export_width = width;
    }
    if let Some(height) = cli.height {
        config.export_height = height;
    }

    let script = std::fs::read_to_string(&cli.script)?;
    let actions: Vec<UiAction> = serde_json::from_str(&script)?;
    log::info!("Replaying {} actions from {}", actions.len(), cli.script.display());

    let mut app = App::new(config);
    for action in actions {
        app.apply(action)?;
    }

    app.export_png(&cli.output)
}

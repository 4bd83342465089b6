use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pixmark::{
    BaseImage, Config, InputState,
    export::{FileSaveConfig, FileSink, PngEncoder},
    input::Tool,
    script,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixmark")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PIXMARK_GIT_HASH"), ")"),
    about = "Annotate raster images with shapes, arrows and text"
)]
struct Cli {
    /// PNG image to annotate
    #[arg(long, short = 'i', value_name = "FILE", required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Gesture script to replay (one command per line)
    #[arg(long, short = 'e', value_name = "FILE")]
    events: Option<PathBuf>,

    /// Output PNG path (default: export directory from config)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/pixmark/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tool active before the script runs (select, rect, ellipse, arrow, pen, text, crop)
    #[arg(long, short = 't', value_name = "TOOL")]
    tool: Option<Tool>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("Created {}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;
    let mut state = InputState::from_config(&config);
    if let Some(tool) = cli.tool {
        state.set_tool(tool);
    }

    let input = cli.input.context("--input is required")?;
    let image = BaseImage::from_png_file(&input)
        .with_context(|| format!("Failed to load image {}", input.display()))?;
    state.load_image(image);

    if let Some(events) = &cli.events {
        let source = fs::read_to_string(events)
            .with_context(|| format!("Failed to read script {}", events.display()))?;
        let commands = script::parse(&source)
            .with_context(|| format!("Invalid script {}", events.display()))?;
        log::info!("Replaying {} commands", commands.len());
        script::run(&mut state, &commands);
    }

    let sink = match cli.output {
        Some(path) => FileSink::to_path(path),
        None => FileSink::Directory(FileSaveConfig::from(&config.export)),
    };

    let result = state.export(&PngEncoder, &sink)?;
    log::info!(
        "{} shapes, {} undo steps",
        state.frame.len(),
        state.history.undo_depth()
    );
    if let Some(path) = result.saved_path {
        println!("Saved {} ({}x{})", path.display(), result.width, result.height);
    }

    Ok(())
}

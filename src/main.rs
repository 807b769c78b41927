use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use strip_rasterizer::app;
use strip_rasterizer::io::config::Config;

/// Software triangle rasterizer driven by a TOML scene file.
#[derive(Parser, Debug)]
#[command(name = "strip_rasterizer", version)]
struct Cli {
    /// Scene configuration (TOML). The built-in scene is used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image; the extension picks the format.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Number of frames to render.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Write the built-in scene as TOML and exit.
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(path) = &cli.write_default_config {
        Config::default().save(path)?;
        info!("Default config written to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config given, using the built-in scene");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.render.output = Some(output);
    }
    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }

    app::run(&config).map(|_| ())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

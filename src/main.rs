//! Cropper batch clip extractor
//!
//! Cuts a list of named clips out of one video with ffmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! cropper probe --input match.mp4
//! cropper validate --input match.mp4 --clip "goal,00:12:03,00:12:40"
//! cropper run --input match.mp4 --output-dir clips --manifest clips.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cropper_cli::app::DefaultAppContainer;
use cropper_cli::cli::{commands, Cli, Commands};
use cropper_cli::config_initialization::initialize_configuration;
use cropper_cli::utils::logging::init_logging;

/// Main entry point for the Cropper CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    init_logging(&config);
    info!("Starting Cropper");

    let container = DefaultAppContainer::new(&config);

    // Execute the requested command
    match cli.command {
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(&container, args).await?;
        }
        Commands::Validate(args) => {
            info!("Executing validate command");
            commands::validate(&container, args).await?;
        }
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(&container, &config, args).await?;
        }
    }

    info!("Cropper completed successfully");
    Ok(())
}

//! scsswatch - compile a SCSS entry point and rebuild it on every change.

mod cli;
mod config;
mod core;
mod logger;
mod pipeline;
mod utils;
mod watcher;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::StyleConfig;
use pipeline::Pipeline;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = StyleConfig::load(&cli)?;
    Pipeline::new(&config).run_default()
}

//! Sunder CLI
//!
//! Runs placement analysis over class models exported by the host compiler
//! and writes the per-target output plus backend artifacts.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sunder_engine::Target;

#[derive(Parser)]
#[command(name = "sunder")]
#[command(about = "Split class models into client and server halves", long_about = None)]
#[command(version)]
struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the placement and signals of every method
    Classify {
        /// Class models (JSON array)
        models: PathBuf,
        /// Configuration file (defaults to ./sunder.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile class models for one target
    Build {
        /// Class models (JSON array)
        models: PathBuf,
        /// Target to compile for: client or server
        #[arg(short, long)]
        target: Target,
        /// Output directory (overrides emit.out_dir)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Compiled backend program to patch and ship with the artifacts
        #[arg(short, long)]
        program: Option<PathBuf>,
        /// Configuration file (defaults to ./sunder.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("sunder_engine", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let color = output::resolve_color_choice(cli.color.as_deref());

    match cli.command {
        Commands::Classify {
            models,
            config,
            json,
        } => commands::classify::execute(&models, config.as_deref(), json, color),

        Commands::Build {
            models,
            target,
            out_dir,
            program,
            config,
        } => commands::build::execute(
            commands::build::BuildArgs {
                models,
                target,
                out_dir,
                program,
                config,
            },
            color,
        ),
    }
}

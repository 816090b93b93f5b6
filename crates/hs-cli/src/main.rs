//! `hs`: compile, check, and roll Heldenschmiede system definitions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

/// Heldenschmiede: tabletop character-creation data tools.
#[derive(Parser)]
#[command(name = "hs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile YAML system definitions into the JSON seed fixture.
    Seed {
        /// Directory holding the YAML definition files.
        #[arg(short, long, default_value = "systems")]
        dir: PathBuf,
        /// Where to write the compiled fixture.
        #[arg(short, long, default_value = "fixtures/systems.json")]
        output: PathBuf,
    },
    /// Validate system definitions without writing anything.
    Check {
        /// Directory holding the YAML definition files.
        #[arg(short, long, default_value = "systems")]
        dir: PathBuf,
    },
    /// Roll a dice expression like "2d6 + 1".
    Roll {
        /// The expression to roll.
        expr: String,
        /// Seed for a reproducible roll; omit for a random one.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Seed { dir, output } => commands::seed::run(&dir, &output),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Roll { expr, seed } => commands::roll::run(&expr, seed),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

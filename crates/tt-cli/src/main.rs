use std::io::{Read, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tt_cli::commands::run::{self, RunOptions};
use tt_cli::{Cli, Commands, Config, ExportFormat};
use tt_core::SystemClock;

/// Read the script from a file, or stdin for `None` and `-`.
fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        _ => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; logs go to stderr so
    // stdout only carries exports
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Run {
            script,
            delimiter,
            json,
        }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let options = RunOptions {
                delimiter: delimiter.clone().unwrap_or(config.delimiter),
                format: if *json { ExportFormat::Json } else { config.format },
            };
            let script = read_script(script.as_deref())?;

            let stdout = stdout();
            let mut writer = stdout.lock();
            run::run(&mut writer, SystemClock, &script, &options)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

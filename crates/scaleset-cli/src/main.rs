//! Scaleset CLI - Command-line interface for scale dataset generation
//!
//! This binary generates, plans, and audits datasets of scale performances.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands, ConfigArgs};
use scaleset_cli::commands;
use scaleset_cli::config::{env_soundfont, resolve_config};
use scaleset_dataset::DatasetConfig;

fn load_config(args: &ConfigArgs) -> anyhow::Result<DatasetConfig> {
    let config = resolve_config(args.config.as_deref(), &args.overrides(), env_soundfont())?;
    tracing::debug!(?config, "resolved dataset config");
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, json } => {
            load_config(&config).and_then(|c| commands::generate::run(&c, json))
        }
        Commands::Plan { config, json } => {
            load_config(&config).and_then(|c| commands::plan::run(&c, json))
        }
        Commands::Audit {
            dataset,
            recheck,
            threshold,
            json,
        } => commands::audit::run(&dataset, recheck, threshold, json),
        Commands::Instruments { category, json } => {
            commands::instruments::run(category.as_deref(), json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

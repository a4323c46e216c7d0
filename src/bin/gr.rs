//! Groupie CLI Binary
//!
//! Command-line interface for virtual file groups.

use clap::Parser;
use groupie::cli::{exit_code, map_error, Cli, RunContext};
use groupie::config::{ConfigLoader, GroupieConfig};
use groupie::error::ApiError;
use groupie::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, config.as_ref().ok());

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(exit_code(&e));
    }

    info!("Groupie CLI starting");

    let context = match config
        .and_then(|config| RunContext::new(&config, cli.store.clone(), cli.no_color))
    {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing CLI context: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

fn load_config(cli: &Cli) -> Result<GroupieConfig, ApiError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: Option<&GroupieConfig>) -> LoggingConfig {
    let mut logging = config.map(|c| c.logging.clone()).unwrap_or_default();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
        if logging.output == "file" {
            logging.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }

    let output_uses_file = logging.output.starts_with("file") || logging.output == "both";
    if logging.enabled && output_uses_file {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), logging.file.clone()) {
            logging.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}

// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Command};
use fpl_munger::config::Config;
use fpl_munger::error::AppError;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed command. Returns whether everything succeeded.
async fn run(args: Args) -> Result<bool, AppError> {
    let config_path = args.config.clone().unwrap_or_else(Config::get_config_path);

    if let Command::Config(config_args) = &args.command
        && commands::is_init_only(config_args)
    {
        commands::handle_config_init(&config_path).await?;
        return Ok(true);
    }

    let config = Config::load(args.config.as_deref()).await?;

    match &args.command {
        Command::Config(config_args) => {
            if config_args.init {
                commands::handle_config_init(&config_path).await?;
            }
            commands::handle_config_list(&config_path, &config);
            Ok(true)
        }
        Command::Run(run_args) => {
            // Keep the guard alive until the run is over so file logs are flushed
            let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
            info!(
                "{} {} starting, logging to {log_file_path}",
                fpl_munger::NAME,
                fpl_munger::VERSION
            );
            commands::handle_run(run_args, config).await
        }
    }
}

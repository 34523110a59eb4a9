//! share-indicator CLI entry point

use std::process::ExitCode;

use clap::Parser;

use share_indicator::cli::{
    app::{cli_config_from_args, load_merged_config, resolve_run_options, run_indicator},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    handle_send_command, handle_status_command,
    presenter::Presenter,
    EXIT_ERROR, EXIT_USAGE_ERROR,
};
use share_indicator::domain::config::AppConfig;
use share_indicator::infrastructure::{init_logging, LogSettings, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let cli_config = match &cli.command {
        Commands::Run(args) => match cli_config_from_args(args) {
            Ok(config) => config,
            Err(e) => {
                presenter.error(&e);
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        _ => AppConfig::empty(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;
    init_logging(&LogSettings::from_config(&config, cli.verbose));

    let result = match cli.command {
        Commands::Run(_) => {
            let store = XdgConfigStore::new();
            return run_indicator(resolve_run_options(&config, &store)).await;
        }
        Commands::Send { event, payload } => {
            handle_send_command(&event, payload.as_deref(), &presenter).await
        }
        Commands::Status => handle_status_command(&presenter).await,
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            handle_config_command(action, &store, &presenter)
                .await
                .map_err(|e| e.to_string())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

//! vidnote CLI entry point

use std::process::ExitCode;

use clap::Parser;

use vidnote::cli::{
    app::{run_note, run_render, run_save, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use vidnote::domain::error::ConfigError;
use vidnote::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Save(args) => run_save(args, cli.config).await,
        Commands::Render(args) => run_render(args).await,
        Commands::Note { action } => run_note(action, cli.config).await,
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::from_override(cli.config);
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e @ ConfigError::ValidationError { .. }) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_USAGE_ERROR)
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}

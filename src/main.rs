//! Flowshelf CLI entry point.

use clap::Parser;

use flowshelf::cli::{Cli, Commands};
use flowshelf::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let options = cli.global_options();

    // Logging follows the config file when it loads; a broken config is
    // reported by the command itself.
    let mut log_config = options
        .load_config()
        .map(|config| LogConfig::from(&config.logging))
        .unwrap_or_default();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    let _logger = match LoggerImpl::init(&log_config) {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let result = match cli.command {
        Commands::Init(args) => flowshelf::cli::commands::init::execute(args, options.json).await,
        Commands::Browse(args) => flowshelf::cli::commands::browse::execute(args, &options).await,
        Commands::Show(args) => flowshelf::cli::commands::show::execute(args, &options).await,
        Commands::Draft(args) => flowshelf::cli::commands::draft::execute(args, &options).await,
        Commands::Delete(args) => flowshelf::cli::commands::delete::execute(args, &options).await,
    };

    if let Err(err) = result {
        flowshelf::cli::handle_error(err, options.json);
    }
}

//! LexLink CLI - Command-line interface for the case connection engine.

use clap::Parser;
use lexlink_cli::commands;
use lexlink_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> lexlink_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &config, &formatter).await?;
        }
        Command::Score(args) => {
            commands::execute_score(args, &config, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `-v` forces debug, otherwise `RUST_LOG` or warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

//! Analyze command implementation.

use super::load_repository;
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Local;
use lexlink_engine::ConnectionEngine;
use tracing::{info, warn};

/// Execute the analyze command.
///
/// The analysis runs on the blocking pool; Ctrl+C abandons it and discards
/// whatever it would have returned.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let repository = load_repository(&args.input)?;

    let mut engine_config = config.engine.clone();
    if let Some(max_insights) = args.max_insights {
        engine_config.max_insights = max_insights;
    }
    let engine = ConnectionEngine::new(engine_config)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let target = args.target;

    info!("Analyzing {} as of {}", target, as_of);

    let task = tokio::task::spawn_blocking(move || {
        engine.analyze_from_repository(&repository, &target, as_of)
    });

    let result = tokio::select! {
        joined = task => joined.map_err(|e| CliError::Task(e.to_string()))??,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, discarding analysis");
            eprintln!("{}", formatter.warning("Analysis interrupted"));
            return Err(CliError::Interrupted);
        }
    };

    println!("{}", formatter.format_analysis(&result)?);
    Ok(())
}

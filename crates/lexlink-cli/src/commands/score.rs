//! Score command implementation.

use super::{load_repository, require_record};
use crate::cli::ScoreArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexlink_engine::ConnectionEngine;

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let repository = load_repository(&args.input)?;
    let first = require_record(&repository, &args.first)?;
    let second = require_record(&repository, &args.second)?;

    let engine = ConnectionEngine::new(config.engine.clone())?;
    let score = engine.score_pair(&first, &second)?;

    println!("{}", formatter.format_pair(&args.first, &args.second, &score)?);
    Ok(())
}

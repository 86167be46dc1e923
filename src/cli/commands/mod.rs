//! Command implementations for the record validator CLI
//!
//! Each command lives in its own module:
//! - `validate`: the record validation job with clean/error/log outputs
//! - `merge`: the worksheet lookup merge

pub mod merge;
pub mod shared;
pub mod validate;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};

/// Dispatch to the subcommand named in `args`
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(validate_args)?;
            Ok(())
        }
        Some(Commands::Merge(merge_args)) => {
            merge::run_merge(merge_args)?;
            Ok(())
        }
        None => bail!("no command given"),
    }
}

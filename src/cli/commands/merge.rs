//! Merge command implementation

use super::shared::{display_path, setup_logging};
use crate::app::services::sheet_merge::{MergeSpec, MergeSummary, merge_sheets};
use crate::cli::args::{MergeArgs, OutputFormat};
use anyhow::{Context, Result};
use colored::*;
use tracing::info;

/// Run the merge command
pub fn run_merge(args: MergeArgs) -> Result<MergeSummary> {
    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let spec = build_spec(&args)?;
    info!(
        "Merging {} into {} on {} = {}",
        spec.source_path.display(),
        spec.target_path.display(),
        spec.target_key,
        spec.source_key
    );

    let summary = merge_sheets(&spec).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            spec.source_path.display(),
            spec.target_path.display()
        )
    })?;

    report(&args, &summary)?;
    Ok(summary)
}

/// Build the merge spec from command-line arguments
pub fn build_spec(args: &MergeArgs) -> Result<MergeSpec> {
    let copies = args.copies().context("Invalid copy column")?;
    let mut spec = MergeSpec::new(&args.target, &args.source)
        .with_keys(&args.target_key, &args.source_key)
        .with_copies(copies);
    if let Some(output) = &args.output {
        spec = spec.with_output_path(output);
    }
    spec.validate().context("Invalid merge settings")?;
    Ok(spec)
}

fn report(args: &MergeArgs, summary: &MergeSummary) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("\n{}", "Merge Complete".bright_green().bold());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!(
                "   • Target rows: {}",
                summary.target_rows.to_string().bright_white().bold()
            );
            println!(
                "   • Matched: {} ({:.1}%)",
                summary.matched_rows,
                summary.match_rate()
            );
            if summary.unmatched_rows > 0 {
                println!(
                    "   • Not found: {}",
                    summary.unmatched_rows.to_string().bright_yellow()
                );
            }
            println!("   • Output: {}", display_path(&summary.output_path));
            println!();
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(summary).context("Failed to render JSON report")?
            );
        }
        OutputFormat::Csv => {
            println!("metric,value");
            println!("target_rows,{}", summary.target_rows);
            println!("matched_rows,{}", summary.matched_rows);
            println!("unmatched_rows,{}", summary.unmatched_rows);
        }
    }
    Ok(())
}

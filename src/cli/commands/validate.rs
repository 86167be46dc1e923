//! Validate command implementation
//!
//! Builds the job configuration from the command line, runs the validation
//! job and reports the summary.

use super::shared::{display_path, setup_logging};
use crate::Result;
use crate::app::services::pipeline::{JobSummary, ValidationJob};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::JobConfig;
use colored::*;
use indicatif::HumanDuration;
use tracing::info;

/// Run the validate command
pub fn run_validate(args: ValidateArgs) -> Result<JobSummary> {
    setup_logging(args.get_log_level(), args.quiet)?;
    args.validate()?;

    let config = build_config(&args)?;
    info!(
        "Starting validation of {} with profile '{}'",
        config.input_path.display(),
        config.profile.name
    );

    let mut job = ValidationJob::new(config);
    let summary = job.run()?;

    if !args.quiet {
        generate_final_report(&args, &summary)?;
    }
    Ok(summary)
}

/// Build the job configuration from defaults and command-line overrides
pub fn build_config(args: &ValidateArgs) -> Result<JobConfig> {
    let mut config = JobConfig::default().with_profile(args.locale_profile()?);

    if let Some(rules) = &args.rules {
        config = config.with_rules_path(rules);
    }
    if let Some(input) = &args.input {
        config = config.with_input_path(input);
    }
    if let Some(path) = &args.clean_output {
        config = config.with_clean_output_path(path);
    }
    if let Some(path) = &args.error_output {
        config = config.with_error_output_path(path);
    }
    if let Some(path) = &args.log_file {
        config = config.with_log_path(path);
    }
    if args.append_log {
        config = config.with_append_log();
    }
    if args.show_progress() {
        config = config.with_progress();
    }

    config.validate()?;
    Ok(config)
}

/// Generate the final job report
fn generate_final_report(args: &ValidateArgs, summary: &JobSummary) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => generate_human_report(summary),
        OutputFormat::Json => generate_json_report(summary),
        OutputFormat::Csv => generate_csv_report(summary),
    }
}

/// Generate human-readable report
fn generate_human_report(summary: &JobSummary) -> Result<()> {
    let stats = &summary.stats;

    if summary.is_fully_clean() {
        println!("\n{}", "Validation Complete".bright_green().bold());
    } else {
        println!(
            "\n{}",
            "Validation Complete (rows need attention)".bright_yellow().bold()
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Profile: {}", summary.profile);
    println!(
        "   • Rows read: {}",
        stats.total_rows.to_string().bright_white().bold()
    );
    println!(
        "   • Clean rows: {} ({:.1}%)",
        stats.clean_rows.to_string().bright_green(),
        stats.clean_rate()
    );
    if stats.error_rows > 0 {
        println!(
            "   • Error rows: {} ({:.1}%)",
            stats.error_rows.to_string().bright_red().bold(),
            stats.error_rate()
        );
    } else {
        println!("   • Error rows: 0");
    }
    if stats.skipped_rows > 0 {
        println!(
            "   • Skipped rows: {}",
            stats.skipped_rows.to_string().bright_yellow()
        );
    }
    println!("   • Corrections: {}", stats.corrections);
    println!("   • Warnings: {}", stats.warnings);
    println!("   • Time: {}", HumanDuration(summary.elapsed));
    println!("   • Throughput: {:.0} rows/sec", summary.rows_per_second());

    if let Some((field, count)) = stats.most_common_failure() {
        println!("   • Most common failure: {} ({} rows)", field, count);
    }

    println!("\nOutput Files:");
    println!("   • Clean: {}", display_path(&summary.clean_output_path));
    println!("   • Errors: {}", display_path(&summary.error_output_path));
    println!("   • Log: {}", display_path(&summary.log_path));
    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(summary: &JobSummary) -> Result<()> {
    let stats = &summary.stats;
    let json = serde_json::json!({
        "profile": summary.profile,
        "total_rows": stats.total_rows,
        "clean_rows": stats.clean_rows,
        "error_rows": stats.error_rows,
        "skipped_rows": stats.skipped_rows,
        "short_circuited_rows": stats.short_circuited_rows,
        "corrections": stats.corrections,
        "warnings": stats.warnings,
        "field_error_counts": stats.field_error_counts,
        "processing_time_seconds": summary.elapsed.as_secs_f64(),
        "rows_per_second": summary.rows_per_second(),
        "outputs": {
            "clean": summary.clean_output_path,
            "errors": summary.error_output_path,
            "log": summary.log_path,
        }
    });

    let rendered = serde_json::to_string_pretty(&json).map_err(|e| {
        crate::Error::configuration(format!("failed to render JSON report: {}", e))
    })?;
    println!("{}", rendered);
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(summary: &JobSummary) -> Result<()> {
    let stats = &summary.stats;
    println!("metric,value");
    println!("total_rows,{}", stats.total_rows);
    println!("clean_rows,{}", stats.clean_rows);
    println!("error_rows,{}", stats.error_rows);
    println!("skipped_rows,{}", stats.skipped_rows);
    println!("corrections,{}", stats.corrections);
    println!("warnings,{}", stats.warnings);
    println!(
        "processing_time_seconds,{}",
        summary.elapsed.as_secs_f64()
    );
    println!("rows_per_second,{:.2}", summary.rows_per_second());
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exif_shift::batch::{self, BatchReport, JobOutcome};
use exif_shift::date::{TimeOffset, format_exif_datetime};
use exif_shift::shift;

#[derive(Parser, Debug)]
#[command(
    name = "exif-shift",
    version,
    about = "Shift EXIF capture timestamps in JPEG images — lossless rewrite for files and directory trees"
)]
struct Cli {
    /// Image files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Days to add to the capture date (negative shifts backward)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    days: i64,

    /// Hours to add
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    hours: i64,

    /// Minutes to add
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    minutes: i64,

    /// Seconds to add
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    seconds: i64,

    /// Keep going when a file fails; failures are listed in the report
    #[arg(long)]
    ignore_errors: bool,

    /// Print each file's capture date and exit without modifying anything
    #[arg(long = "show-date")]
    show_date: bool,

    /// Output the per-file report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let files = collect_inputs(&cli.paths);
    if files.is_empty() {
        anyhow::bail!("No files found in the specified paths.");
    }

    // Handle --show-date
    if cli.show_date {
        for path in &files {
            match shift::read_capture_date(path) {
                Ok(date) => println!("{}: {}", path.display(), format_exif_datetime(&date)),
                Err(e) => log::error!("{}: {e}", path.display()),
            }
        }
        return Ok(());
    }

    let offset = TimeOffset::new(cli.days, cli.hours, cli.minutes, cli.seconds);
    if offset.is_zero() {
        log::warn!("Offset is zero; capture dates will be rewritten unchanged");
    }

    log::info!("Found {} file(s), shifting by {offset}", files.len());

    let report = match batch::shift_files(&files, &offset, cli.ignore_errors) {
        Ok(report) => report,
        Err(e) => {
            print_summary(&e.report);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    }

    print_summary(&report);
    Ok(())
}

/// Expand the command-line paths: files pass through, directories are walked.
fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(batch::collect_files(path));
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }
    files
}

fn report_json(report: &BatchReport) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = report
        .results
        .iter()
        .map(|result| {
            let path = result.path.display().to_string();
            match &result.outcome {
                JobOutcome::Succeeded { previous, updated } => serde_json::json!({
                    "path": path,
                    "outcome": "succeeded",
                    "previous": format_exif_datetime(previous),
                    "updated": format_exif_datetime(updated),
                }),
                JobOutcome::Skipped => serde_json::json!({
                    "path": path,
                    "outcome": "skipped",
                }),
                JobOutcome::Failed(e) => serde_json::json!({
                    "path": path,
                    "outcome": "failed",
                    "error": e.to_string(),
                }),
            }
        })
        .collect();

    serde_json::Value::Array(entries)
}

fn print_summary(report: &BatchReport) {
    log::info!(
        "Done: {} shifted, {} skipped, {} failed out of {} files",
        report.shifted(),
        report.skipped(),
        report.failed(),
        report.results.len()
    );
}

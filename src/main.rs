/*!
 * Command-line interface for codedump
 */

use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use codedump::config::{Args, Config};
use codedump::dumper::Dumper;
use codedump::report::{ReportFormat, Reporter, RunSummary};
use codedump::utils::count_files;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Diagnostics go to stderr so they never mix with the summary
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(&args);
    config.validate()?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Scanning");
    progress.set_message(config.target_dir.display().to_string());

    // Count files for progress tracking
    let total_files = count_files(&config)?;
    progress.set_length(total_files);
    progress.set_prefix("Dumping");

    let start_time = Instant::now();
    let dumper = Dumper::new(config.clone(), Arc::new(progress.clone()));
    let result = dumper.dump();
    progress.finish_and_clear();
    let report = result?;

    if args.summary {
        let summary = RunSummary {
            output_file: config.output_file.display().to_string(),
            duration: start_time.elapsed(),
            report,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&summary);
    }

    Ok(())
}

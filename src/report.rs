/*!
 * Reporting functionality for codedump
 *
 * Renders the outcome of a dump run as console tables using the tabled
 * library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::DumpReport;
use crate::utils::format_file_size;

/// Everything the summary needs about a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Output file path
    pub output_file: String,
    /// Time taken by the run
    pub duration: Duration,
    /// Result of the dump
    pub report: DumpReport,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for dump results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for a finished run
    pub fn generate_report(&self, summary: &RunSummary) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(summary),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, summary: &RunSummary) {
        println!("\n{}", self.generate_report(summary));
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_summary_table(&self, summary: &RunSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let report = &summary.report;
        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: summary.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", summary.duration),
            },
            SummaryRow {
                key: "Files Written",
                value: report.files_written.to_string(),
            },
            SummaryRow {
                key: "Content Size",
                value: format_file_size(report.bytes_written),
            },
            SummaryRow {
                key: "Files Excluded",
                value: report.files_excluded.to_string(),
            },
            SummaryRow {
                key: "Binary Skipped",
                value: report.files_skipped_binary.len().to_string(),
            },
            SummaryRow {
                key: "Read Errors",
                value: report.files_skipped_error.len().to_string(),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_skipped_table(&self, report: &DumpReport) -> String {
        #[derive(Tabled)]
        struct SkippedRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let binary = report.files_skipped_binary.iter().map(|path| SkippedRow {
            path: path.display().to_string(),
            reason: "binary/non-text".to_string(),
        });
        let errors = report
            .files_skipped_error
            .iter()
            .map(|(path, reason)| SkippedRow {
                path: path.display().to_string(),
                reason: reason.clone(),
            });

        Self::styled(Table::new(binary.chain(errors)))
    }

    fn generate_console_report(&self, summary: &RunSummary) -> String {
        let summary_table = self.create_summary_table(summary);
        let report = &summary.report;

        if report.files_skipped_binary.is_empty() && report.files_skipped_error.is_empty() {
            return format!("DUMP COMPLETE\n{}", summary_table);
        }

        format!(
            "SKIPPED FILES\n{}\n\nDUMP COMPLETE\n{}",
            self.create_skipped_table(report),
            summary_table
        )
    }
}

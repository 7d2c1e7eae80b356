/*!
 * The dump operation: walk, filter, read and write
 */

use std::io::Write;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DumpError, Result};
use crate::scanner::Scanner;
use crate::types::{DumpReport, FileContent};
use crate::writer::DumpWriter;

/// Concatenates every included file under the target directory into one output file
pub struct Dumper {
    /// Dumper configuration
    config: Config,
    /// Directory walker
    scanner: Scanner,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Dumper {
    /// Create a new dumper
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self {
            scanner: Scanner::new(config.clone()),
            config,
            progress,
        }
    }

    /// Write the dump to the configured output file
    ///
    /// Only an invalid configuration or a failure on the output file aborts
    /// the run. The file is flushed before returning and closed on every path.
    pub fn dump(&self) -> Result<DumpReport> {
        self.config.validate()?;

        let mut writer = DumpWriter::create(&self.config.output_file)?;
        let report = self.dump_into(&mut writer)?;
        writer.finish().map_err(|e| self.output_error(e))?;

        Ok(report)
    }

    /// Walk the target directory, appending every included file to `writer`
    pub fn dump_into<W: Write>(&self, writer: &mut DumpWriter<W>) -> Result<DumpReport> {
        let mut report = DumpReport::default();
        debug!("dumping {}", self.config.target_dir.display());

        for entry in self.scanner.walk()? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| self.scanner.relative_path(p))
                        .unwrap_or_else(|| self.config.target_dir.clone());
                    let reason = err
                        .io_error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| err.to_string());
                    self.progress
                        .suspend(|| warn!("Error reading {}: {}", path.display(), reason));
                    report.files_skipped_error.push((path, reason));
                    if err.path().is_some_and(|p| p.is_dir()) {
                        report.dirs_unlistable += 1;
                    }
                    continue;
                }
            };

            if self.config.exclusions.excludes_file(&entry.name) {
                debug!("excluded {}", entry.rel_path.display());
                report.files_excluded += 1;
                continue;
            }

            self.progress.inc(1);
            self.progress
                .set_message(format!("Current file: {}", entry.rel_path.display()));

            match self.scanner.read_entry(&entry) {
                FileContent::Text(content) => {
                    writer
                        .write_entry(&entry.rel_path, &content)
                        .map_err(|e| self.output_error(e))?;
                    report.files_written += 1;
                }
                FileContent::Binary => {
                    self.progress.suspend(|| {
                        warn!("Skipping binary/non-text file: {}", entry.rel_path.display())
                    });
                    report.files_skipped_binary.push(entry.rel_path);
                }
                FileContent::Unreadable(reason) => {
                    self.progress.suspend(|| {
                        warn!("Error reading {}: {}", entry.rel_path.display(), reason)
                    });
                    report.files_skipped_error.push((entry.rel_path, reason));
                }
            }
        }

        report.bytes_written = writer.bytes_written();
        debug!(
            "wrote {} files ({} bytes) to {}",
            report.files_written,
            report.bytes_written,
            self.config.output_file.display()
        );

        Ok(report)
    }

    fn output_error(&self, source: std::io::Error) -> DumpError {
        DumpError::Output {
            path: self.config.output_file.clone(),
            source,
        }
    }
}

/// Run a dump with no progress display
pub fn dump(config: &Config) -> Result<DumpReport> {
    Dumper::new(config.clone(), Arc::new(ProgressBar::hidden())).dump()
}

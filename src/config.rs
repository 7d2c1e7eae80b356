/*!
 * Configuration handling for codedump
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::Result;
use crate::utils::{
    file_extension, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_EXTENSIONS, DEFAULT_EXCLUDED_FILES,
    DEFAULT_OUTPUT_FILE,
};
use crate::{bail, ensure};

/// Command-line arguments for codedump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codedump",
    version = crate::VERSION,
    about = "Concatenate the text files of a directory tree into a single dump file",
    long_about = "Walks a directory tree and writes the contents of every non-excluded text file into one output file, each preceded by a header naming its path."
)]
pub struct Args {
    /// Root directory to walk
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Print a summary table once the dump is written
    #[clap(long)]
    pub summary: bool,

    /// Do not show the progress spinner
    #[clap(long, short)]
    pub quiet: bool,
}

/// Name-based exclusion rules applied during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionConfig {
    /// Directory names whose whole subtree is skipped
    pub excluded_dirs: HashSet<String>,
    /// Exact file names that are skipped
    pub excluded_files: HashSet<String>,
    /// File extensions, leading dot included, that are skipped
    pub excluded_extensions: HashSet<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExclusionConfig {
    /// Rules that exclude nothing
    pub fn empty() -> Self {
        Self {
            excluded_dirs: HashSet::new(),
            excluded_files: HashSet::new(),
            excluded_extensions: HashSet::new(),
        }
    }

    /// Also exclude the file name of `output_file`, so a dump never reads itself
    pub fn with_output_file(mut self, output_file: &Path) -> Self {
        if let Some(name) = output_file.file_name() {
            self.excluded_files
                .insert(name.to_string_lossy().into_owned());
        }
        self
    }

    /// Whether a directory with this name is pruned from the walk
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Whether a file with this name is skipped, by exact name or by extension
    pub fn excludes_file(&self, name: &str) -> bool {
        if self.excluded_files.contains(name) {
            return true;
        }

        match file_extension(name) {
            Some(ext) => self.excluded_extensions.contains(ext),
            None => false,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to walk
    pub target_dir: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Exclusion rules, the output file name included
    pub exclusions: ExclusionConfig,
}

impl Config {
    /// Configuration with the default exclusion sets
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self::with_exclusions(target_dir, output_file, ExclusionConfig::default())
    }

    /// Configuration with explicit exclusion rules
    ///
    /// The output file name is added to `exclusions` regardless of what the
    /// caller passed.
    pub fn with_exclusions(
        target_dir: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        exclusions: ExclusionConfig,
    ) -> Self {
        let output_file = output_file.into();
        Self {
            target_dir: target_dir.into(),
            exclusions: exclusions.with_output_file(&output_file),
            output_file,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(&args.directory_path, &args.output_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                bail!(Config, "Output directory not found: {}", parent.display());
            }
        }

        if self.output_file.is_dir() {
            bail!(
                Config,
                "Output path is a directory: {}",
                self.output_file.display()
            );
        }

        Ok(())
    }
}

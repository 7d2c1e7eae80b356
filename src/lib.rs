/*!
 * codedump - Concatenate the text files of a directory tree into one file
 *
 * Walks a directory, skips excluded directories, names and extensions, and
 * writes every remaining UTF-8 file to a single output file, each preceded
 * by a header carrying its path relative to the walk root.
 */

pub mod config;
pub mod dumper;
pub mod error;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config, ExclusionConfig};
pub use dumper::{dump, Dumper};
pub use error::{DumpError, Result};
pub use report::{ReportFormat, Reporter, RunSummary};
pub use scanner::Scanner;
pub use types::{DumpReport, FileContent, TraversalEntry};
pub use utils::{count_files, format_file_size};
pub use writer::{delimiter_block, DumpWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

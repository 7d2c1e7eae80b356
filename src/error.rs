//! Global error handling for codedump
//!
//! Only failures that abort a run live here. Per-file problems (undecodable
//! or unreadable files) are recorded in the [`DumpReport`](crate::types::DumpReport)
//! and never surface as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for codedump operations
#[derive(Error, Debug)]
pub enum DumpError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The output artifact could not be created, written or flushed
    #[error("Failed to write output file {}: {source}", path.display())]
    Output {
        /// Path of the output file
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for codedump operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Creates a DumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets the binary keep an io::Result main
impl From<DumpError> for io::Error {
    fn from(err: DumpError) -> Self {
        match err {
            DumpError::Io(e) => e,
            DumpError::Config(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

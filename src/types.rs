/*!
 * Core types and data structures for codedump
 */

use std::path::PathBuf;

/// A file discovered during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    /// Path relative to the traversal root, in `./dir/file` form
    pub rel_path: PathBuf,
    /// File name
    pub name: String,
    /// Path used to open the file
    pub abs_path: PathBuf,
}

/// Result of reading a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Valid UTF-8 text, kept verbatim
    Text(String),
    /// Content is not valid UTF-8
    Binary,
    /// The file could not be opened or read
    Unreadable(String),
}

/// Outcome of a full dump run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpReport {
    /// Number of files whose header and contents were written
    pub files_written: usize,
    /// Files skipped because they were not valid UTF-8
    pub files_skipped_binary: Vec<PathBuf>,
    /// Files (or directories) skipped because of a read error, with the reason
    pub files_skipped_error: Vec<(PathBuf, String)>,
    /// Files dropped by the exclusion rules
    pub files_excluded: usize,
    /// Content bytes written, delimiter blocks not included
    pub bytes_written: u64,
    /// Entries of `files_skipped_error` that are directories which could not be listed
    pub dirs_unlistable: usize,
}

impl DumpReport {
    /// Total number of files the walk looked at, excluded ones included
    ///
    /// Directories that could not be listed are not counted.
    pub fn files_seen(&self) -> usize {
        self.files_written
            + self.files_skipped_binary.len()
            + self.files_skipped_error.len()
            + self.files_excluded
            - self.dirs_unlistable
    }
}

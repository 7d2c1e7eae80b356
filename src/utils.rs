/*!
 * Utility functions for codedump
 */

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::config::Config;
use crate::error::Result;
use crate::scanner::Scanner;

/// Count the files that will be read, for progress tracking
pub fn count_files(config: &Config) -> Result<u64> {
    let scanner = Scanner::new(config.clone());
    let mut count = 0;

    for entry in scanner.walk()?.flatten() {
        if !config.exclusions.excludes_file(&entry.name) {
            count += 1;
        }
    }

    Ok(count)
}

/// Extension of a file name, from the last `.` and including it
///
/// Leading dots do not start an extension, so `.gitignore` has none while
/// `archive.tar.gz` has `.gz`.
pub fn file_extension(name: &str) -> Option<&str> {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    name[stem_start..]
        .rfind('.')
        .map(|idx| &name[stem_start + idx..])
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "code_dump.txt";

/// Directories skipped entirely
pub static DEFAULT_EXCLUDED_DIRS: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| BTreeSet::from([".git", "node_modules"]));

/// Exact file names skipped
pub static DEFAULT_EXCLUDED_FILES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "package.json",
        "package-lock.json",
        ".gitignore",
        "export_to_text.py",
        "README.md",
    ])
});

/// File extensions skipped
pub static DEFAULT_EXCLUDED_EXTENSIONS: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| BTreeSet::from([".md", ".txt", ".py"]));

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("main.rs"), Some(".rs"));
        assert_eq!(file_extension("archive.tar.gz"), Some(".gz"));
        assert_eq!(file_extension("Makefile"), None);
        assert_eq!(file_extension(".gitignore"), None);
        assert_eq!(file_extension("..hidden"), None);
        assert_eq!(file_extension(".env.local"), Some(".local"));
        assert_eq!(file_extension("trailing."), Some("."));
    }

    #[test]
    fn test_count_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join(".git").join("HEAD"), "ref").unwrap();
        fs::write(temp_dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "notes").unwrap();

        let config = Config::new(temp_dir.path(), "code_dump.txt");
        assert_eq!(count_files(&config).unwrap(), 1);

        let missing = Config::new(temp_dir.path().join("missing"), "code_dump.txt");
        assert!(count_files(&missing).is_err());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}

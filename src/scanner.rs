/*!
 * Directory walking and file reading
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::ensure;
use crate::error::Result;
use crate::types::{FileContent, TraversalEntry};

/// Walks the target directory in a stable order, pruning excluded directories
pub struct Scanner {
    /// Scanner configuration
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Iterate over every non-directory entry under the target directory
    ///
    /// Within a directory, files come before subdirectories and each group
    /// is sorted by name. Excluded directories are never opened. Entries are
    /// not checked against the file exclusion rules here.
    pub fn walk(&self) -> Result<impl Iterator<Item = walkdir::Result<TraversalEntry>> + '_> {
        let root = &self.config.target_dir;
        ensure!(
            root.is_dir(),
            Config,
            "Target directory not found: {}",
            root.display()
        );

        let exclusions = &self.config.exclusions;
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(move |e| {
                // The root is never pruned, whatever its name
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !exclusions.excludes_dir(&e.file_name().to_string_lossy())
            });

        Ok(walker.filter_map(move |result| match result {
            Ok(entry) if entry.file_type().is_dir() => None,
            // Links to directories are listed but never descended into
            Ok(entry) if entry.path_is_symlink() && entry.path().is_dir() => None,
            Ok(entry) => Some(Ok(self.traversal_entry(&entry))),
            Err(err) => Some(Err(err)),
        }))
    }

    /// Path of `path` relative to the traversal root, as `./dir/file`
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        let rel = path.strip_prefix(&self.config.target_dir).unwrap_or(path);
        Path::new(".").join(rel)
    }

    /// Read a file and decode it as UTF-8
    pub fn read_entry(&self, entry: &TraversalEntry) -> FileContent {
        read_file(&entry.abs_path)
    }

    fn traversal_entry(&self, entry: &DirEntry) -> TraversalEntry {
        TraversalEntry {
            rel_path: self.relative_path(entry.path()),
            name: entry.file_name().to_string_lossy().into_owned(),
            abs_path: entry.path().to_path_buf(),
        }
    }
}

/// Read a whole file, classifying it as text, binary or unreadable
pub fn read_file(path: &Path) -> FileContent {
    // Follows symlinks, so a dangling link is reported as unreadable
    match fs::metadata(path) {
        Ok(metadata) if !metadata.is_file() => {
            return FileContent::Unreadable("not a regular file".to_string());
        }
        Ok(_) => {}
        Err(e) => return FileContent::Unreadable(e.to_string()),
    }

    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(_) => FileContent::Binary,
        },
        Err(e) => FileContent::Unreadable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn walked_paths(scanner: &Scanner) -> Vec<String> {
        scanner
            .walk()
            .unwrap()
            .map(|e| e.unwrap().rel_path.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_files_before_directories_sorted_by_name() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a_dir/inner")).unwrap();
        fs::write(root.join("z.rs"), "z").unwrap();
        fs::write(root.join("b.rs"), "b").unwrap();
        fs::write(root.join("a_dir/y.rs"), "y").unwrap();
        fs::write(root.join("a_dir/inner/x.rs"), "x").unwrap();

        let scanner = Scanner::new(Config::new(root, "dump.out"));

        assert_eq!(
            walked_paths(&scanner),
            vec!["./b.rs", "./z.rs", "./a_dir/y.rs", "./a_dir/inner/x.rs"]
        );
    }

    #[test]
    fn test_excluded_directories_are_pruned() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("src/node_modules")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join(".git/objects/ab"), "obj").unwrap();
        fs::write(root.join("src/node_modules/dep.js"), "dep").unwrap();
        fs::write(root.join("src/lib.rs"), "lib").unwrap();

        let scanner = Scanner::new(Config::new(root, "dump.out"));

        assert_eq!(walked_paths(&scanner), vec!["./src/lib.rs"]);
    }

    #[test]
    fn test_root_is_never_excluded() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join(".git");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let scanner = Scanner::new(Config::new(&root, "dump.out"));

        assert_eq!(walked_paths(&scanner), vec!["./main.rs"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let scanner = Scanner::new(Config::new(temp_dir.path().join("missing"), "dump.out"));

        assert!(scanner.walk().is_err());
    }

    #[test]
    fn test_read_file_classification() {
        let temp_dir = tempdir().unwrap();
        let text = temp_dir.path().join("text.rs");
        let binary = temp_dir.path().join("blob.bin");

        fs::write(&text, "line one\r\nline two").unwrap();
        let mut file = File::create(&binary).unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert_eq!(
            read_file(&text),
            FileContent::Text("line one\r\nline two".to_string())
        );
        assert_eq!(read_file(&binary), FileContent::Binary);
        assert!(matches!(
            read_file(&temp_dir.path().join("gone.rs")),
            FileContent::Unreadable(reason) if !reason.is_empty()
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_special_files_are_not_read() {
        use std::os::unix::net::UnixListener;
        use std::process::Command;

        let temp_dir = tempdir().unwrap();
        let socket = temp_dir.path().join("daemon.sock");
        let _listener = UnixListener::bind(&socket).unwrap();

        assert_eq!(
            read_file(&socket),
            FileContent::Unreadable("not a regular file".to_string())
        );

        // Reading a FIFO with no writer would block forever
        let fifo = temp_dir.path().join("pipe.rs");
        let made_fifo = Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if made_fifo {
            assert_eq!(
                read_file(&fifo),
                FileContent::Unreadable("not a regular file".to_string())
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("root");
        let outside = temp_dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("secret.rs"), "secret").unwrap();
        fs::write(root.join("main.rs"), "main").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("linked")).unwrap();

        let scanner = Scanner::new(Config::new(&root, "dump.out"));

        assert_eq!(walked_paths(&scanner), vec!["./main.rs"]);
    }
}

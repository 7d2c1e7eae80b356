/*!
 * Output artifact writer for codedump
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DumpError, Result};

/// Width of the `=` lines framing each path header
pub const DELIMITER_WIDTH: usize = 40;

/// Header written before a file's contents
///
/// A blank line, a rule of `=`, the relative path, and a second rule.
pub fn delimiter_block(rel_path: &Path) -> String {
    let rule = "=".repeat(DELIMITER_WIDTH);
    format!("\n{}\n{}\n{}\n", rule, rel_path.to_string_lossy(), rule)
}

/// Append-only writer for the dump file
pub struct DumpWriter<W: Write> {
    inner: W,
    /// Content bytes written so far, headers not included
    bytes_written: u64,
}

impl DumpWriter<BufWriter<File>> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| DumpError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DumpWriter<W> {
    /// Wrap an arbitrary writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Append one file: its delimiter block followed by the contents verbatim
    pub fn write_entry(&mut self, rel_path: &Path, content: &str) -> io::Result<()> {
        self.inner
            .write_all(delimiter_block(rel_path).as_bytes())?;
        self.inner.write_all(content.as_bytes())?;
        self.bytes_written += content.len() as u64;
        Ok(())
    }

    /// Content bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush buffered output and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_block_format() {
        let block = delimiter_block(Path::new("./src/main.rs"));
        let rule = "=".repeat(40);

        assert_eq!(block, format!("\n{rule}\n./src/main.rs\n{rule}\n"));
    }

    #[test]
    fn test_contents_are_written_verbatim() {
        let mut writer = DumpWriter::new(Vec::new());
        writer
            .write_entry(Path::new("./a.rs"), "no trailing newline")
            .unwrap();
        writer
            .write_entry(Path::new("./b.rs"), "crlf\r\n\r\n")
            .unwrap();

        assert_eq!(writer.bytes_written(), 19 + 8);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        let expected = format!(
            "{}no trailing newline{}crlf\r\n\r\n",
            delimiter_block(Path::new("./a.rs")),
            delimiter_block(Path::new("./b.rs"))
        );
        assert_eq!(out, expected);
    }
}

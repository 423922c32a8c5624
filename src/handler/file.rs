//! Append-to-file sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::format::{DefaultFormatter, Formatter};
use crate::handler::{Handler, HandlerError};
use crate::record::Record;

/// Appends one rendered line per record to a file opened at construction.
///
/// Uses `parking_lot::Mutex` around the file handle; concurrent emitters
/// serialize on the write, never interleave within a line.
pub struct FileHandler {
    formatter: Box<dyn Formatter>,
    file: Mutex<File>,
    path: PathBuf,
}

impl FileHandler {
    /// Open `path` for appending, creating it if absent.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            formatter: Box::new(DefaultFormatter),
            file: Mutex::new(file),
            path,
        })
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn accept(&self, record: &Record) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        let mut file = self.file.lock();
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::record::Origin;
    use chrono::Utc;

    #[test]
    fn appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let handler = FileHandler::create(&path).unwrap();

        for text in ["first", "second"] {
            let record =
                Record::new(Level::Info, text, Utc::now(), Origin::new("t", "op", 1));
            handler.accept(&record).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file that passed every filter stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// The path as reached by the walk, rooted at the canonical root.
    pub absolute_path: PathBuf,
    /// The path relative to the root, used in the block header.
    pub relative_path: PathBuf,
}

impl FileRecord {
    pub(crate) fn new(root: &Path, path: PathBuf) -> Self {
        let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self {
            absolute_path: path,
            relative_path,
        }
    }

    /// Reads the whole file, replacing invalid UTF-8 with U+FFFD.
    pub fn read_content(&self) -> io::Result<String> {
        let bytes = fs::read(&self.absolute_path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A file whose header was written but whose content could not be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: String,
}

/// A recoverable failure, reported while the run continues.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// The header was written but the content could not be read.
    Unreadable(SkippedFile),
    /// The walk could not visit an entry.
    Walk(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unreadable(skipped) => write!(
                f,
                "Skipping {} due to error: {}",
                skipped.path.display(),
                skipped.error
            ),
            Diagnostic::Walk(error) => write!(f, "Skipping entry due to error: {}", error),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Serialize, Deserialize)]
pub struct AicatReport {
    /// Where the concatenation was written.
    pub output: PathBuf,
    /// Relative paths of the files written, in walk order.
    pub files: Vec<PathBuf>,
    /// Files skipped because reading their content failed.
    pub skipped: Vec<SkippedFile>,
    /// Entries the walk itself could not visit.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub walk_errors: Vec<String>,
}

impl AicatReport {
    pub(crate) fn new(output: PathBuf) -> Self {
        Self {
            output,
            files: Vec::new(),
            skipped: Vec::new(),
            walk_errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_path_strips_root() {
        let record = FileRecord::new(Path::new("/r"), PathBuf::from("/r/src/main.rs"));
        assert_eq!(record.relative_path, PathBuf::from("src/main.rs"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9").unwrap();
        let record = FileRecord::new(dir.path(), path);
        assert_eq!(record.read_content().unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn diagnostics_name_the_skipped_entry() {
        let unreadable = Diagnostic::Unreadable(SkippedFile {
            path: PathBuf::from("/r/a.txt"),
            error: "Permission denied (os error 13)".to_string(),
        });
        assert_eq!(
            unreadable.to_string(),
            "Skipping /r/a.txt due to error: Permission denied (os error 13)"
        );
        let walk = Diagnostic::Walk("File system loop found".to_string());
        assert_eq!(
            walk.to_string(),
            "Skipping entry due to error: File system loop found"
        );
    }
}

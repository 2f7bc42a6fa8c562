use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum AicatError {
    #[error("directory '{}' does not exist.", path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}
impl AicatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AicatError::Io {
            path: path.into(),
            source,
        }
    }
}

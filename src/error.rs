// error.rs - Error kinds shared by both pipelines

use std::path::Path;
use thiserror::Error;

/// Every failure is fatal; the variant only records which kind it was.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Bad path, out-of-range flag, malformed alias file or header
    #[error("{0}")]
    Config(String),

    /// Non-numeric field, degenerate column, malformed coordinate pair
    #[error("{0}")]
    Data(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl MatrixError {
    pub fn config(msg: impl Into<String>) -> Self {
        MatrixError::Config(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        MatrixError::Data(msg.into())
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        MatrixError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        MatrixError::Csv {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, MatrixError::Config(_) | MatrixError::Io { .. })
    }

    pub fn is_data(&self) -> bool {
        matches!(self, MatrixError::Data(_) | MatrixError::Csv { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

//! Error handling for Zygo XYZ parsing and export operations.
//!
//! Every parse failure is fatal to the call: the reader either returns a
//! complete header and grid or one of these errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XyzError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Could not read file: {path} - {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed header at line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("Malformed data row at line {line}: {reason}")]
    MalformedDataRow { line: usize, reason: String },

    #[error(
        "Incomplete raster: expected {expected} points for a {x_len} x {y_len} grid, found {actual}"
    )]
    IncompleteRaster {
        expected: usize,
        actual: usize,
        x_len: usize,
        y_len: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed for file: {path} - {reason}")]
    ExportFailed { path: PathBuf, reason: String },
}

impl XyzError {
    pub(crate) fn header(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn data_row(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDataRow {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Map an I/O failure on `path` to `FileNotFound` or `Unreadable`
    pub(crate) fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Unreadable { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, XyzError>;

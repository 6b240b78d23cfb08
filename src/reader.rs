//! File-level entry point: read, decode header, decode grid.

use crate::config::ParserConfig;
use crate::error::{Result, XyzError};
use crate::grid::decode_grid;
use crate::header::decode_header;
use crate::models::{ParsedHeader, SampleGrid, XyzFile};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Reader for Zygo XYZ files
#[derive(Debug, Clone, Default)]
pub struct XyzReader {
    config: ParserConfig,
}

impl XyzReader {
    /// Create a reader with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the reader
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read and parse a file
    ///
    /// The whole file is loaded before decoding starts; the handle is closed
    /// by then whatever the outcome of parsing.
    pub fn read(&self, path: &Path) -> Result<XyzFile> {
        let bytes = std::fs::read(path).map_err(|e| XyzError::from_read(path.to_path_buf(), e))?;

        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            warn!(
                "{} is not valid UTF-8; undecodable bytes were replaced",
                path.display()
            );
        }

        let file = self.parse_str(&text)?;
        debug!(
            "Parsed {}: {} x {} raster, {} invalid samples",
            path.display(),
            file.grid.x_len(),
            file.grid.y_len(),
            file.grid.invalid_count()
        );
        Ok(file)
    }

    /// Parse file contents already held in memory
    pub fn parse_str(&self, text: &str) -> Result<XyzFile> {
        let lines: Vec<&str> = text.lines().collect();
        let header = decode_header(&lines, self.config.objective_format)?;
        let grid = decode_grid(&lines, &header, &self.config)?;
        Ok(XyzFile { header, grid })
    }
}

/// Parse `path` with the default configuration
pub fn parse(path: impl AsRef<Path>) -> Result<(ParsedHeader, SampleGrid)> {
    XyzReader::new().read(path.as_ref()).map(XyzFile::into_parts)
}

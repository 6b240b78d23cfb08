//! Configuration for parsing and export.
//!
//! Provides the decoder switches (system-line variant, unit scaling) and
//! the tabular export settings used by the writer and the CLI.

use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};

/// How the objective name is encoded on header line 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ObjectiveFormat {
    /// Quoted when the line contains a double quote, numeric otherwise
    #[default]
    Auto,
    /// Six numeric fields followed by a double-quoted name
    Quoted,
    /// Seven numeric fields, the last one an objective code
    Unquoted,
}

/// Decoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Encoding of the objective name on the system line
    pub objective_format: ObjectiveFormat,

    /// Multiply x/y by the camera resolution and z by the interferometric
    /// scale factor. When disabled the grids hold raw indices and raw heights.
    pub apply_scaling: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            objective_format: ObjectiveFormat::Auto,
            apply_scaling: true,
        }
    }
}

impl ParserConfig {
    /// Set the system-line variant
    pub fn with_objective_format(mut self, objective_format: ObjectiveFormat) -> Self {
        self.objective_format = objective_format;
        self
    }

    /// Keep raw pixel indices and raw heights
    pub fn without_scaling(mut self) -> Self {
        self.apply_scaling = false;
        self
    }
}

/// Output table format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Parquet,
    Csv,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Parquet => "parquet",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    #[value(name = "none")]
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Tabular export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output table format
    pub format: ExportFormat,

    /// Parquet compression (ignored for CSV)
    pub compression: CompressionAlgorithm,

    /// Write dropout cells as rows with a null height instead of omitting them
    pub include_invalid: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Parquet,
            compression: CompressionAlgorithm::Snappy,
            include_invalid: true,
        }
    }
}

impl ExportConfig {
    /// Set the output format
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Omit dropout cells from the output table
    pub fn without_invalid(mut self) -> Self {
        self.include_invalid = false;
        self
    }
}

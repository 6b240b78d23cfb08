//! Tabular export of parsed grids
//!
//! Writes one row per raster cell with columns `x`, `y` and `z`, in the
//! y-major order the instrument emits. Dropout cells carry a null height or
//! are omitted, depending on `ExportConfig::include_invalid`.

use crate::config::{ExportConfig, ExportFormat};
use crate::error::{Result, XyzError};
use crate::models::{SampleGrid, XyzFile};

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Grid exporter for Parquet and CSV output
#[derive(Debug, Clone, Default)]
pub struct GridExporter {
    config: ExportConfig,
}

impl GridExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Long-format table of a grid
    pub fn to_dataframe(&self, grid: &SampleGrid) -> Result<DataFrame> {
        let capacity = if self.config.include_invalid {
            grid.len()
        } else {
            grid.valid_count()
        };
        let mut xs = Vec::with_capacity(capacity);
        let mut ys = Vec::with_capacity(capacity);
        let mut zs: Vec<Option<f64>> = Vec::with_capacity(capacity);

        for y in 0..grid.y_len() {
            for x in 0..grid.x_len() {
                let sample = grid.z_grid()[[x, y]];
                if !self.config.include_invalid && !sample.is_valid() {
                    continue;
                }
                xs.push(grid.x_grid()[[x, y]]);
                ys.push(grid.y_grid()[[x, y]]);
                zs.push(sample.value());
            }
        }

        Ok(polars::df!("x" => xs, "y" => ys, "z" => zs)?)
    }

    /// Write a parsed file to `output_path`, returning the number of rows written
    pub fn write(&self, file: &XyzFile, output_path: &Path) -> Result<usize> {
        let mut df = self.to_dataframe(&file.grid)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let out = File::create(output_path)?;

        match self.config.format {
            ExportFormat::Parquet => {
                ParquetWriter::new(out)
                    .with_compression(self.config.compression.to_polars_compression())
                    .finish(&mut df)
                    .map_err(|e| XyzError::ExportFailed {
                        path: output_path.to_path_buf(),
                        reason: format!("Failed to write parquet: {}", e),
                    })?;
            }
            ExportFormat::Csv => {
                CsvWriter::new(out)
                    .include_header(true)
                    .finish(&mut df)
                    .map_err(|e| XyzError::ExportFailed {
                        path: output_path.to_path_buf(),
                        reason: format!("Failed to write csv: {}", e),
                    })?;
            }
        }

        debug!(
            "Wrote {} rows to {} ({:?})",
            df.height(),
            output_path.display(),
            self.config.format
        );
        Ok(df.height())
    }
}

/// Output path for `input` inside `output_dir`, with the format's extension
pub fn output_path_for(input: &Path, output_dir: &Path, format: ExportFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

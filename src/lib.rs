//! Zygo XYZ Reader Library
//!
//! A Rust library for reading Zygo interferometer surface-profile exports
//! (`*.xyz`, MetroPro "ASCII Data File" header followed by a point list)
//! into typed header metadata and dense x/y/z grids.
//!
//! This library provides tools for:
//! - Decoding the fixed-position MetroPro header into a `ParsedHeader`
//! - Decoding the point list into `SampleGrid` rasters with unit scaling
//! - Explicit handling of dropout pixels through `Sample::Invalid`
//! - Preparing plot input (`SurfaceMap`) and exporting Parquet/CSV tables
//!
//! # Example
//!
//! ```no_run
//! let (header, grid) = zygo_xyz::parse("scan.xyz")?;
//! println!(
//!     "{} x {} raster at {} per pixel, {} dropouts",
//!     grid.x_len(),
//!     grid.y_len(),
//!     header.camera_res,
//!     grid.invalid_count()
//! );
//! # Ok::<(), zygo_xyz::XyzError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod grid;
pub mod header;
pub mod models;
pub mod reader;
pub mod render;
pub mod writer;

// Re-export commonly used types
pub use config::{ExportConfig, ObjectiveFormat, ParserConfig};
pub use error::{Result, XyzError};
pub use models::{Objective, ParsedHeader, Sample, SampleGrid, XyzFile};
pub use reader::{XyzReader, parse};
pub use render::SurfaceMap;
pub use writer::GridExporter;

//! Core data structures for parsed Zygo XYZ files.
//!
//! Defines the fixed header record, the explicit invalid-sample marker and
//! the dense sample grids produced by the reader.

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Objective lens identification from header line 8
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Objective {
    /// Name taken from the double-quoted field
    Name(String),
    /// Numeric code from the unquoted variant
    Code(f64),
}

/// Metadata decoded from the fixed-position header lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedHeader {
    // line 2
    pub intens_origin_x: f64,
    pub intens_origin_y: f64,
    pub intens_width: f64,
    pub intens_height: f64,
    pub n_buckets: f64,
    pub intens_range: f64,

    // line 3
    pub phase_origin_x: f64,
    pub phase_origin_y: f64,
    pub phase_width: f64,
    pub phase_height: f64,

    // line 7
    pub source: f64,
    /// Physical height per raw fringe-count unit
    pub intf_scale_factor: f64,
    pub wavelength_in: f64,
    pub numerical_aperture: f64,
    pub obliquity_factor: f64,
    pub magnification: f64,
    /// Physical length per pixel
    pub camera_res: f64,
    /// Acquisition time, seconds since the Unix epoch
    pub time_stamp: f64,

    // line 8
    pub camera_width: f64,
    pub camera_height: f64,
    pub system_type: f64,
    pub system_board: f64,
    pub system_serial: f64,
    pub instrument_id: f64,
    pub objective_name: Objective,

    // line 9
    pub acquire_mode: f64,
    pub intens_avgs: f64,
    pub pzt_cal: f64,
    pub pzt_gain: f64,
    pub pzt_gain_tolerance: f64,
    pub agc: f64,
    pub target_range: f64,
    pub light_level: f64,
    pub min_mod: f64,
    pub min_mod_pts: f64,

    // line 10
    pub phase_res: f64,
    pub phase_avgs: f64,
    pub minimum_area_size: f64,
    pub discon_action: f64,
    pub discon_filter: f64,
    pub connection_order: f64,
    pub remove_tilt_bias: f64,
    pub data_sign: f64,
    pub code_v_type: f64,

    // line 12
    pub refractive_index: f64,
    pub part_thickness: f64,

    // line 13
    pub zoom_desc: Vec<String>,
}

impl ParsedHeader {
    /// Acquisition time as a UTC timestamp, if `time_stamp` is representable
    pub fn acquired_at(&self) -> Option<DateTime<Utc>> {
        if !self.time_stamp.is_finite() {
            return None;
        }
        let secs = self.time_stamp.floor();
        let nanos = ((self.time_stamp - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// Objective as display text
    pub fn objective_label(&self) -> String {
        match &self.objective_name {
            Objective::Name(name) => name.trim().to_string(),
            Objective::Code(code) => code.to_string(),
        }
    }
}

/// One height cell of the raster
///
/// `Invalid` marks a pixel inside the scan raster that has no measured
/// height (interferometer dropout).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Valid(f64),
    Invalid,
}

impl Sample {
    /// Wrap a raw height; non-finite values become `Invalid`
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() {
            Sample::Valid(value)
        } else {
            Sample::Invalid
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Valid(v) => Some(v),
            Sample::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Sample::Valid(_))
    }

    /// Multiply a measured height; `Invalid` stays `Invalid` and a measured
    /// height stays measured even if the product overflows
    pub fn scale(self, factor: f64) -> Self {
        match self {
            Sample::Valid(v) => Sample::Valid(v * factor),
            Sample::Invalid => Sample::Invalid,
        }
    }

    /// Height as `f64` with NaN standing in for `Invalid`
    pub fn to_f64(self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }
}

/// Dense x/y/z grids of one scan, indexed `[[x, y]]`
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    x: Array2<f64>,
    y: Array2<f64>,
    z: Array2<Sample>,
}

impl SampleGrid {
    pub(crate) fn from_parts(x: Array2<f64>, y: Array2<f64>, z: Array2<Sample>) -> Self {
        debug_assert_eq!(x.dim(), z.dim());
        debug_assert_eq!(y.dim(), z.dim());
        Self { x, y, z }
    }

    pub fn x_grid(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y_grid(&self) -> &Array2<f64> {
        &self.y
    }

    pub fn z_grid(&self) -> &Array2<Sample> {
        &self.z
    }

    /// `(x_len, y_len)`
    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }

    pub fn x_len(&self) -> usize {
        self.z.nrows()
    }

    pub fn y_len(&self) -> usize {
        self.z.ncols()
    }

    /// Number of raster cells
    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.z.iter().filter(|s| s.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.len() - self.valid_count()
    }

    /// Height grid with NaN at dropout cells
    pub fn z_as_nan(&self) -> Array2<f64> {
        self.z.mapv(Sample::to_f64)
    }

    /// Minimum and maximum measured height, `None` when every cell is invalid
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .filter_map(|s| s.value())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// New grid with x/y multiplied by `lateral` and heights by `height`
    pub fn scaled(&self, lateral: f64, height: f64) -> Self {
        Self {
            x: self.x.mapv(|v| v * lateral),
            y: self.y.mapv(|v| v * lateral),
            z: self.z.mapv(|s| s.scale(height)),
        }
    }
}

/// A fully parsed file
#[derive(Debug, Clone)]
pub struct XyzFile {
    pub header: ParsedHeader,
    pub grid: SampleGrid,
}

impl XyzFile {
    pub fn into_parts(self) -> (ParsedHeader, SampleGrid) {
        (self.header, self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_grid() -> SampleGrid {
        SampleGrid::from_parts(
            array![[0.0, 0.0], [1.0, 1.0]],
            array![[0.0, 1.0], [0.0, 1.0]],
            array![
                [Sample::Valid(100.0), Sample::Invalid],
                [Sample::Valid(200.0), Sample::Valid(-50.0)]
            ],
        )
    }

    #[test]
    fn test_sample_scale_keeps_invalid() {
        assert_eq!(Sample::Invalid.scale(2.0), Sample::Invalid);
        assert_eq!(Sample::Invalid.scale(0.0), Sample::Invalid);
        assert_eq!(Sample::Valid(1.5).scale(2.0), Sample::Valid(3.0));
        assert!(Sample::Invalid.to_f64().is_nan());
    }

    #[test]
    fn test_sample_scale_overflow_stays_valid() {
        let scaled = Sample::Valid(1e300).scale(1e10);
        assert!(scaled.is_valid());
        assert_eq!(scaled.value(), Some(f64::INFINITY));
        assert_eq!(Sample::Valid(-1e300).scale(1e10).value(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_sample_from_raw() {
        assert_eq!(Sample::from_raw(f64::NAN), Sample::Invalid);
        assert_eq!(Sample::from_raw(f64::INFINITY), Sample::Invalid);
        assert_eq!(Sample::from_raw(-2.0), Sample::Valid(-2.0));
    }

    #[test]
    fn test_grid_counts_and_range() {
        let grid = small_grid();
        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.valid_count(), 3);
        assert_eq!(grid.invalid_count(), 1);
        assert_eq!(grid.z_range(), Some((-50.0, 200.0)));
        assert!(grid.z_as_nan()[[0, 1]].is_nan());
    }

    #[test]
    fn test_scaling_round_trip() {
        let grid = small_grid();
        let k = 0.37;
        let back = grid.scaled(k, k).scaled(1.0 / k, 1.0 / k);

        for (a, b) in grid.x_grid().iter().zip(back.x_grid().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in grid.z_grid().iter().zip(back.z_grid().iter()) {
            match (a, b) {
                (Sample::Valid(a), Sample::Valid(b)) => assert!((a - b).abs() < 1e-9),
                (Sample::Invalid, Sample::Invalid) => {}
                other => panic!("validity changed by scaling: {other:?}"),
            }
        }
    }

    #[test]
    fn test_acquired_at() {
        let mut header = crate::header::tests::sample_header();
        header.time_stamp = 1_000_000_000.0;
        let when = header.acquired_at().unwrap();
        assert_eq!(when.timestamp(), 1_000_000_000);

        header.time_stamp = f64::NAN;
        assert!(header.acquired_at().is_none());
    }
}

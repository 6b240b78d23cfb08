//! Input for colour-mapped surface plots.
//!
//! Drawing is left to the caller's plotting library. `SurfaceMap` holds what
//! such a figure consumes: axis values in the caller's length unit, the
//! height grid with NaN at dropout cells, and the colour range.

use crate::error::{Result, XyzError};
use crate::models::SampleGrid;
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct SurfaceMap {
    /// x coordinate of each axis-0 index, divided by the unit divisor
    pub x_axis: Vec<f64>,
    /// y coordinate of each axis-1 index, divided by the unit divisor
    pub y_axis: Vec<f64>,
    /// Heights indexed `[[x, y]]`, NaN where the sample is invalid
    pub heights: Array2<f64>,
    /// Finite height range, `None` when no sample is valid
    pub color_range: Option<(f64, f64)>,
}

impl SurfaceMap {
    /// Build plot input from a parsed grid
    ///
    /// `length_divisor` converts grid lengths to the axis unit, e.g. `1e-3`
    /// to label metre-scaled grids in millimetres.
    pub fn new(grid: &SampleGrid, length_divisor: f64) -> Result<Self> {
        if !length_divisor.is_finite() || length_divisor <= 0.0 {
            return Err(XyzError::configuration(format!(
                "length divisor must be finite and positive, got {}",
                length_divisor
            )));
        }

        let x_axis = grid
            .x_grid()
            .column(0)
            .iter()
            .map(|v| v / length_divisor)
            .collect();
        let y_axis = grid
            .y_grid()
            .row(0)
            .iter()
            .map(|v| v / length_divisor)
            .collect();

        Ok(Self {
            x_axis,
            y_axis,
            heights: grid.z_as_nan(),
            color_range: grid.z_range(),
        })
    }

    /// `[x_min, x_max, y_min, y_max]` of the axes
    pub fn extent(&self) -> Option<[f64; 4]> {
        let (x_first, x_last) = (self.x_axis.first()?, self.x_axis.last()?);
        let (y_first, y_last) = (self.y_axis.first()?, self.y_axis.last()?);
        Some([
            x_first.min(*x_last),
            x_first.max(*x_last),
            y_first.min(*y_last),
            y_first.max(*y_last),
        ])
    }
}

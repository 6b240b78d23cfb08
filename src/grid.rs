//! Point-list decoding into dense sample grids.
//!
//! Rows after the header are `y x z` (measured) or `y x` followed by two
//! sentinel tokens (dropout). Rows are placed by their index pair, so the
//! result does not depend on emission order.

use crate::config::ParserConfig;
use crate::constants::{DATA_START_LINE, DATA_TERMINATOR, INVALID_ROW_TOKENS, VALID_ROW_TOKENS};
use crate::error::{Result, XyzError};
use crate::models::{ParsedHeader, Sample, SampleGrid};
use ndarray::Array2;
use tracing::debug;

/// Largest pixel index accepted on a data row
const MAX_INDEX: f64 = u32::MAX as f64;

/// One decoded data row
#[derive(Debug, Clone, Copy)]
struct RawRow {
    line: usize,
    x: usize,
    y: usize,
    z: Sample,
}

/// Decode the data section of `lines` into grids of shape `(x_len, y_len)`
///
/// `lines` is the whole file; decoding starts at `DATA_START_LINE`. Unit
/// scaling uses the header's `camera_res` (x, y) and `intf_scale_factor` (z)
/// when `config.apply_scaling` is set.
pub fn decode_grid(
    lines: &[&str],
    header: &ParsedHeader,
    config: &ParserConfig,
) -> Result<SampleGrid> {
    let mut rows = Vec::with_capacity(lines.len().saturating_sub(DATA_START_LINE));

    for (line, text) in lines.iter().enumerate().skip(DATA_START_LINE) {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if text == DATA_TERMINATOR {
            debug!("Data terminator at line {}", line);
            break;
        }
        rows.push(decode_row(line, text)?);
    }

    let (Some(max_x), Some(max_y)) = (
        rows.iter().map(|r| r.x).max(),
        rows.iter().map(|r| r.y).max(),
    ) else {
        return Err(XyzError::data_row(DATA_START_LINE, "no data rows"));
    };

    let x_len = max_x + 1;
    let y_len = max_y + 1;
    let expected = x_len.saturating_mul(y_len);

    if rows.len() != expected {
        return Err(XyzError::IncompleteRaster {
            expected,
            actual: rows.len(),
            x_len,
            y_len,
        });
    }

    // Row-major (y, x) placement, the layout y-major emission would reshape to
    let mut cells: Vec<Option<Sample>> = vec![None; expected];
    for row in &rows {
        let slot = &mut cells[row.y * x_len + row.x];
        if slot.is_some() {
            return Err(XyzError::data_row(
                row.line,
                format!("duplicate sample at x={}, y={}", row.x, row.y),
            ));
        }
        *slot = Some(row.z);
    }

    let z_flat: Vec<Sample> = cells
        .into_iter()
        .map(|cell| cell.unwrap_or(Sample::Invalid))
        .collect();
    let x_flat: Vec<f64> = (0..expected).map(|i| (i % x_len) as f64).collect();
    let y_flat: Vec<f64> = (0..expected).map(|i| (i / x_len) as f64).collect();

    let grid = SampleGrid::from_parts(
        to_raster(x_flat, x_len, y_len)?,
        to_raster(y_flat, x_len, y_len)?,
        to_raster(z_flat, x_len, y_len)?,
    );

    debug!(
        "Decoded {} rows into a {} x {} raster ({} invalid)",
        rows.len(),
        x_len,
        y_len,
        grid.invalid_count()
    );

    if config.apply_scaling {
        Ok(grid.scaled(header.camera_res, header.intf_scale_factor))
    } else {
        Ok(grid)
    }
}

/// Reshape a row-major `(y_len, x_len)` list, then transpose so axis 0 is x
fn to_raster<T>(flat: Vec<T>, x_len: usize, y_len: usize) -> Result<Array2<T>> {
    let grid = Array2::from_shape_vec((y_len, x_len), flat)
        .map_err(|e| XyzError::data_row(DATA_START_LINE, e.to_string()))?;
    Ok(grid.reversed_axes())
}

fn decode_row(line: usize, text: &str) -> Result<RawRow> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let z = match tokens.len() {
        VALID_ROW_TOKENS => {
            let raw = tokens[2].parse::<f64>().map_err(|_| {
                XyzError::data_row(line, format!("invalid height '{}'", tokens[2]))
            })?;
            Sample::from_raw(raw)
        }
        INVALID_ROW_TOKENS => Sample::Invalid,
        n => {
            return Err(XyzError::data_row(
                line,
                format!(
                    "expected {} or {} tokens, found {}",
                    VALID_ROW_TOKENS, INVALID_ROW_TOKENS, n
                ),
            ));
        }
    };

    Ok(RawRow {
        line,
        y: parse_index(line, tokens[0], "y")?,
        x: parse_index(line, tokens[1], "x")?,
        z,
    })
}

fn parse_index(line: usize, token: &str, axis: &str) -> Result<usize> {
    let value = token
        .parse::<f64>()
        .map_err(|_| XyzError::data_row(line, format!("invalid {} index '{}'", axis, token)))?;

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_INDEX {
        return Err(XyzError::data_row(
            line,
            format!("{} index '{}' is not a non-negative integer", axis, token),
        ));
    }
    Ok(value as usize)
}

//! MetroPro ASCII header decoding.
//!
//! Decodes the fixed-position header lines of a Zygo XYZ file into a
//! `ParsedHeader`. Decoding is all-or-nothing: the first malformed line
//! aborts with an error naming the line index.

use crate::config::ObjectiveFormat;
use crate::constants::{
    ACQUISITION_FIELDS, ACQUISITION_LINE, DATA_START_LINE, INTENSITY_FIELDS, INTENSITY_LINE,
    OBJECTIVE_FIELD, OBJECTIVE_QUOTE, OPTICS_FIELDS, OPTICS_LINE, PART_FIELDS, PART_LINE,
    PHASE_FIELDS, PHASE_LINE, PHASE_PROCESSING_FIELDS, PHASE_PROCESSING_LINE, SYSTEM_FIELDS,
    SYSTEM_LINE, ZOOM_LINE,
};
use crate::error::{Result, XyzError};
use crate::models::{Objective, ParsedHeader};
use tracing::debug;

/// Decode the header block from the file's lines (terminators already stripped)
pub fn decode_header(lines: &[&str], objective_format: ObjectiveFormat) -> Result<ParsedHeader> {
    if lines.len() < DATA_START_LINE {
        return Err(XyzError::header(
            lines.len(),
            format!(
                "file ends after {} lines, header needs {}",
                lines.len(),
                DATA_START_LINE
            ),
        ));
    }

    let [
        intens_origin_x,
        intens_origin_y,
        intens_width,
        intens_height,
        n_buckets,
        intens_range,
    ] = numeric_line(lines, INTENSITY_LINE, &INTENSITY_FIELDS)?;

    let [phase_origin_x, phase_origin_y, phase_width, phase_height] =
        numeric_line(lines, PHASE_LINE, &PHASE_FIELDS)?;

    let [
        source,
        intf_scale_factor,
        wavelength_in,
        numerical_aperture,
        obliquity_factor,
        magnification,
        camera_res,
        time_stamp,
    ] = numeric_line(lines, OPTICS_LINE, &OPTICS_FIELDS)?;

    let (
        [
            camera_width,
            camera_height,
            system_type,
            system_board,
            system_serial,
            instrument_id,
        ],
        objective_name,
    ) = decode_system_line(lines[SYSTEM_LINE], objective_format)?;

    let [
        acquire_mode,
        intens_avgs,
        pzt_cal,
        pzt_gain,
        pzt_gain_tolerance,
        agc,
        target_range,
        light_level,
        min_mod,
        min_mod_pts,
    ] = numeric_line(lines, ACQUISITION_LINE, &ACQUISITION_FIELDS)?;

    let [
        phase_res,
        phase_avgs,
        minimum_area_size,
        discon_action,
        discon_filter,
        connection_order,
        remove_tilt_bias,
        data_sign,
        code_v_type,
    ] = numeric_line(lines, PHASE_PROCESSING_LINE, &PHASE_PROCESSING_FIELDS)?;

    let [refractive_index, part_thickness] = numeric_line(lines, PART_LINE, &PART_FIELDS)?;

    let zoom_desc = lines[ZOOM_LINE]
        .split_whitespace()
        .map(str::to_string)
        .collect();

    debug!(
        "Decoded header: camera_res={}, intf_scale_factor={}, objective={:?}",
        camera_res, intf_scale_factor, objective_name
    );

    Ok(ParsedHeader {
        intens_origin_x,
        intens_origin_y,
        intens_width,
        intens_height,
        n_buckets,
        intens_range,
        phase_origin_x,
        phase_origin_y,
        phase_width,
        phase_height,
        source,
        intf_scale_factor,
        wavelength_in,
        numerical_aperture,
        obliquity_factor,
        magnification,
        camera_res,
        time_stamp,
        camera_width,
        camera_height,
        system_type,
        system_board,
        system_serial,
        instrument_id,
        objective_name,
        acquire_mode,
        intens_avgs,
        pzt_cal,
        pzt_gain,
        pzt_gain_tolerance,
        agc,
        target_range,
        light_level,
        min_mod,
        min_mod_pts,
        phase_res,
        phase_avgs,
        minimum_area_size,
        discon_action,
        discon_filter,
        connection_order,
        remove_tilt_bias,
        data_sign,
        code_v_type,
        refractive_index,
        part_thickness,
        zoom_desc,
    })
}

/// Parse a header line made only of numeric fields
fn numeric_line<const N: usize>(
    lines: &[&str],
    index: usize,
    fields: &[&str; N],
) -> Result<[f64; N]> {
    let tokens: Vec<&str> = lines[index].split_whitespace().collect();
    parse_fields(index, &tokens, fields)
}

fn parse_fields<const N: usize>(
    line: usize,
    tokens: &[&str],
    fields: &[&str; N],
) -> Result<[f64; N]> {
    if tokens.len() != N {
        return Err(XyzError::header(
            line,
            format!("expected {} fields, found {}", N, tokens.len()),
        ));
    }

    let mut values = [0.0; N];
    for ((value, token), field) in values.iter_mut().zip(tokens).zip(fields) {
        *value = parse_number(line, token, field)?;
    }
    Ok(values)
}

fn parse_number(line: usize, token: &str, field: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(XyzError::header(
            line,
            format!("invalid value '{}' for {}", token, field),
        )),
    }
}

/// Decode line 8: six numeric fields plus the objective, which is either a
/// double-quoted name or a seventh numeric token.
fn decode_system_line(
    line: &str,
    objective_format: ObjectiveFormat,
) -> Result<([f64; 6], Objective)> {
    let quoted = match objective_format {
        ObjectiveFormat::Auto => line.contains(OBJECTIVE_QUOTE),
        ObjectiveFormat::Quoted => true,
        ObjectiveFormat::Unquoted => false,
    };

    if quoted {
        let mut parts = line.splitn(3, OBJECTIVE_QUOTE);
        let numeric = parts.next().unwrap_or_default();
        let name = parts.next().ok_or_else(|| {
            XyzError::header(SYSTEM_LINE, "expected a quoted objective name")
        })?;
        let trailing = parts
            .next()
            .ok_or_else(|| XyzError::header(SYSTEM_LINE, "unterminated objective name"))?;
        if !trailing.trim().is_empty() {
            return Err(XyzError::header(
                SYSTEM_LINE,
                format!("unexpected text after objective name: '{}'", trailing.trim()),
            ));
        }

        let tokens: Vec<&str> = numeric.split_whitespace().collect();
        let values = parse_fields(SYSTEM_LINE, &tokens, &SYSTEM_FIELDS)?;
        Ok((values, Objective::Name(name.to_string())))
    } else {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let expected = SYSTEM_FIELDS.len() + 1;
        if tokens.len() != expected {
            return Err(XyzError::header(
                SYSTEM_LINE,
                format!("expected {} fields, found {}", expected, tokens.len()),
            ));
        }
        let (numeric, objective) = tokens.split_at(SYSTEM_FIELDS.len());
        let values = parse_fields(SYSTEM_LINE, numeric, &SYSTEM_FIELDS)?;
        let code = parse_number(SYSTEM_LINE, objective[0], OBJECTIVE_FIELD)?;
        Ok((values, Objective::Code(code)))
    }
}

//! Integration tests for the XYZ reader
//!
//! Writes MetroPro-style files to disk and checks end-to-end parsing:
//! header fields, raster shape, dropout handling and failure modes.

use std::io::Write;
use tempfile::NamedTempFile;
use zygo_xyz::{ObjectiveFormat, ParserConfig, Sample, XyzError, XyzReader, parse};

const HEADER: &str = r#"Zygo ASCII Data File - Format 2
0 0 0 0 "MetroPro 8.3.5        " "Jun 02 2011"
0 0 0 0 0 0
0 0 4 3
"polished flat"
""
""
0 0.5 6.328e-07 0.3 1 20 1.1e-06 1306999999
640 480 1 0 4702 0 "20x Mirau"
0 1 0.0 0 0 1 0.1 50 7 0
1 1 7 0 1 0 0 0 0
0 ""
1 0
"  1"
"#;

/// Build a y-major point list for an `x_len` x `y_len` raster; `dropouts`
/// lists `(x, y)` cells written as "No Data"
fn point_list(x_len: usize, y_len: usize, dropouts: &[(usize, usize)]) -> String {
    let mut body = String::new();
    for y in 0..y_len {
        for x in 0..x_len {
            if dropouts.contains(&(x, y)) {
                body.push_str(&format!("{} {} No Data\n", y, x));
            } else {
                body.push_str(&format!("{} {} {}\n", y, x, (10 * x + y) as f64 * 0.25));
            }
        }
    }
    body
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file
}

#[test]
fn test_parse_complete_file() {
    let temp_file = write_file(&format!("{}{}#\n", HEADER, point_list(4, 3, &[(2, 1)])));

    let (header, grid) = parse(temp_file.path()).unwrap();

    assert_eq!(header.phase_width, 4.0);
    assert_eq!(header.phase_height, 3.0);
    assert_eq!(header.intf_scale_factor, 0.5);
    assert_eq!(header.camera_res, 1.1e-6);
    assert_eq!(header.objective_label(), "20x Mirau");
    assert_eq!(header.acquired_at().unwrap().timestamp(), 1_306_999_999);

    assert_eq!(grid.shape(), (4, 3));
    assert_eq!(grid.x_len() * grid.y_len(), 12);
    assert_eq!(grid.x_grid().dim(), grid.z_grid().dim());
    assert_eq!(grid.y_grid().dim(), grid.z_grid().dim());
    assert_eq!(grid.invalid_count(), 1);
    assert_eq!(grid.z_grid()[[2, 1]], Sample::Invalid);

    // x = 3, y = 2 -> raw 32 * 0.25 = 8.0, scaled by 0.5
    assert_eq!(grid.z_grid()[[3, 2]], Sample::Valid(4.0));
    assert!((grid.x_grid()[[3, 2]] - 3.0 * 1.1e-6).abs() < 1e-18);
    assert!((grid.y_grid()[[3, 2]] - 2.0 * 1.1e-6).abs() < 1e-18);
}

#[test]
fn test_every_dropout_row_is_invalid() {
    let dropouts = [(0, 0), (1, 2), (3, 1)];
    let text = format!("{}{}", HEADER, point_list(4, 3, &dropouts));
    let file = XyzReader::new().parse_str(&text).unwrap();

    for ((x, y), sample) in file.grid.z_grid().indexed_iter() {
        assert_eq!(
            dropouts.contains(&(x, y)),
            !sample.is_valid(),
            "unexpected validity at ({x}, {y})"
        );
    }
}

#[test]
fn test_raw_mode_keeps_indices() {
    let text = format!("{}{}", HEADER, point_list(4, 3, &[]));
    let reader = XyzReader::new().with_config(ParserConfig::default().without_scaling());
    let file = reader.parse_str(&text).unwrap();

    assert_eq!(file.grid.x_grid()[[3, 0]], 3.0);
    assert_eq!(file.grid.y_grid()[[0, 2]], 2.0);
    assert_eq!(file.grid.z_grid()[[3, 2]], Sample::Valid(8.0));
}

#[test]
fn test_truncated_file_fails() {
    let mut body = point_list(4, 3, &[]);
    // drop the last two rows
    for _ in 0..2 {
        body.pop();
        let cut = body.rfind('\n').map_or(0, |i| i + 1);
        body.truncate(cut);
    }
    let temp_file = write_file(&format!("{}{}", HEADER, body));

    match parse(temp_file.path()).unwrap_err() {
        XyzError::IncompleteRaster {
            expected, actual, ..
        } => {
            assert_eq!(expected, 12);
            assert_eq!(actual, 10);
        }
        other => panic!("Expected IncompleteRaster error, got {other:?}"),
    }
}

#[test]
fn test_malformed_optics_line() {
    let text = HEADER.replace(
        "0 0.5 6.328e-07 0.3 1 20 1.1e-06 1306999999",
        "0 0.5 6.328e-07 0.3 1 20 1.1e-06",
    );
    let temp_file = write_file(&format!("{}{}", text, point_list(2, 2, &[])));

    match parse(temp_file.path()).unwrap_err() {
        XyzError::MalformedHeader { line, .. } => assert_eq!(line, 7),
        other => panic!("Expected MalformedHeader error, got {other:?}"),
    }
}

#[test]
fn test_unquoted_system_line() {
    let text = HEADER.replace("640 480 1 0 4702 0 \"20x Mirau\"", "640 480 1 0 4702 0 2");
    let text = format!("{}{}", text, point_list(2, 2, &[]));

    let reader = XyzReader::new()
        .with_config(ParserConfig::default().with_objective_format(ObjectiveFormat::Unquoted));
    let file = reader.parse_str(&text).unwrap();
    assert_eq!(file.header.objective_label(), "2");
    assert_eq!(file.header.system_serial, 4702.0);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        parse(dir.path().join("nope.xyz")),
        Err(XyzError::FileNotFound { .. })
    ));
}

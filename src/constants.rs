//! Format constants for MetroPro ASCII data files
//!
//! Line positions are zero-indexed. Lines 0-1, 4-6 and 11 carry nothing
//! the reader needs and are skipped.

// =============================================================================
// Header Layout
// =============================================================================

/// Intensity data geometry
pub const INTENSITY_LINE: usize = 2;

/// Phase data geometry
pub const PHASE_LINE: usize = 3;

/// Optics and scale constants
pub const OPTICS_LINE: usize = 7;

/// Camera and system identification, optionally with a quoted objective name
pub const SYSTEM_LINE: usize = 8;

/// Acquisition settings
pub const ACQUISITION_LINE: usize = 9;

/// Phase processing settings
pub const PHASE_PROCESSING_LINE: usize = 10;

/// Part properties
pub const PART_LINE: usize = 12;

/// Zoom descriptor
pub const ZOOM_LINE: usize = 13;

/// First line of the point list
pub const DATA_START_LINE: usize = 14;

// =============================================================================
// Header Field Names
// =============================================================================

pub const INTENSITY_FIELDS: [&str; 6] = [
    "intens_origin_x",
    "intens_origin_y",
    "intens_width",
    "intens_height",
    "n_buckets",
    "intens_range",
];

pub const PHASE_FIELDS: [&str; 4] = [
    "phase_origin_x",
    "phase_origin_y",
    "phase_width",
    "phase_height",
];

pub const OPTICS_FIELDS: [&str; 8] = [
    "source",
    "intf_scale_factor",
    "wavelength_in",
    "numerical_aperture",
    "obliquity_factor",
    "magnification",
    "camera_res",
    "time_stamp",
];

/// Numeric fields of the system line; the unquoted variant adds a seventh
/// numeric token for the objective.
pub const SYSTEM_FIELDS: [&str; 6] = [
    "camera_width",
    "camera_height",
    "system_type",
    "system_board",
    "system_serial",
    "instrument_id",
];

pub const OBJECTIVE_FIELD: &str = "objective_name";

pub const ACQUISITION_FIELDS: [&str; 10] = [
    "acquire_mode",
    "intens_avgs",
    "pzt_cal",
    "pzt_gain",
    "pzt_gain_tolerance",
    "agc",
    "target_range",
    "light_level",
    "min_mod",
    "min_mod_pts",
];

pub const PHASE_PROCESSING_FIELDS: [&str; 9] = [
    "phase_res",
    "phase_avgs",
    "minimum_area_size",
    "discon_action",
    "discon_filter",
    "connection_order",
    "remove_tilt_bias",
    "data_sign",
    "code_v_type",
];

pub const PART_FIELDS: [&str; 2] = ["refractive_index", "part_thickness"];

// =============================================================================
// Data Section
// =============================================================================

/// Token count of a row carrying a measured height: `y x z`
pub const VALID_ROW_TOKENS: usize = 3;

/// Token count of a dropout row: `y x` followed by two sentinel tokens
pub const INVALID_ROW_TOKENS: usize = 4;

/// End-of-data marker written by MetroPro
pub const DATA_TERMINATOR: &str = "#";

/// Quote delimiting the objective name on the system line
pub const OBJECTIVE_QUOTE: char = '"';

// =============================================================================
// File Discovery
// =============================================================================

/// Extension of Zygo ASCII exports (matched case-insensitively)
pub const XYZ_EXTENSION: &str = "xyz";

/// Default output directory for the convert command
pub const DEFAULT_OUTPUT_DIR: &str = "output";

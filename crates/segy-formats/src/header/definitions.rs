//! Standard SEG-Y revision 1 header field tables
//!
//! Offsets are relative to the start of each header: the binary reel header
//! begins at file offset 3200 and each trace header at the offset recorded in
//! the trace offset catalog. Byte ranges the standard leaves unassigned are
//! simply absent and compile to gaps.

use crate::datatypes::LogicalType::{Int16, Int32, UInt16};
use crate::datatypes::Value;
use crate::header::schema::{FieldSpec, HeaderSchema};

/// Width of the binary reel header in bytes
pub const BINARY_REEL_HEADER_LEN: usize = 400;

/// Width of a trace header in bytes
pub const TRACE_HEADER_LEN: usize = 240;

/// Field names the library itself depends on
pub mod names {
    /// Samples per trace (reel header: nominal, trace header: actual)
    pub const NS: &str = "ns";
    /// Binary reel header data sample format code
    pub const DATA_SAMPLE_FORMAT: &str = "data_sample_format";
    /// Binary reel header revision code
    pub const SEGY_FORMAT_REVISION: &str = "segy_format_revision";
    /// Binary reel header declared extended textual header count
    pub const NUM_EXTENDED_TEXTUAL_HEADERS: &str = "num_extended_textual_headers";
    /// Trace sequence number within the file
    pub const TRACE_SEQUENCE_FILE: &str = "trace_sequence_file";
    /// Common depth point ensemble number
    pub const CDP: &str = "cdp";
    /// 3-D inline number
    pub const INLINE_3D: &str = "inline_3d";
    /// 3-D crossline number
    pub const CROSSLINE_3D: &str = "crossline_3d";
}

/// Binary reel header fields
pub const BINARY_REEL_HEADER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("job_id", 0, Int32),
    FieldSpec::new("line_number", 4, Int32),
    FieldSpec::new("reel_number", 8, Int32),
    FieldSpec::new("data_traces_per_ensemble", 12, Int16),
    FieldSpec::new("aux_traces_per_ensemble", 14, Int16),
    FieldSpec::new("interval", 16, Int16),
    FieldSpec::new("interval_original", 18, Int16),
    FieldSpec::new("ns", 20, UInt16),
    FieldSpec::new("ns_original", 22, UInt16),
    FieldSpec::new("data_sample_format", 24, Int16).with_default(Value::Int(1)),
    FieldSpec::new("ensemble_fold", 26, Int16),
    FieldSpec::new("trace_sorting", 28, Int16),
    FieldSpec::new("vertical_sum_code", 30, Int16),
    FieldSpec::new("sweep_frequency_start", 32, Int16),
    FieldSpec::new("sweep_frequency_end", 34, Int16),
    FieldSpec::new("sweep_length", 36, Int16),
    FieldSpec::new("sweep_type", 38, Int16),
    FieldSpec::new("sweep_channel", 40, Int16),
    FieldSpec::new("sweep_taper_start", 42, Int16),
    FieldSpec::new("sweep_taper_end", 44, Int16),
    FieldSpec::new("taper_type", 46, Int16),
    FieldSpec::new("correlated_traces", 48, Int16),
    FieldSpec::new("binary_gain_recovery", 50, Int16),
    FieldSpec::new("amplitude_recovery", 52, Int16),
    FieldSpec::new("measurement_system", 54, Int16),
    FieldSpec::new("impulse_signal_polarity", 56, Int16),
    FieldSpec::new("vibratory_polarity", 58, Int16),
    FieldSpec::new("segy_format_revision", 300, UInt16).with_default(Value::Int(0x0100)),
    FieldSpec::new("fixed_length_trace_flag", 302, Int16),
    FieldSpec::new("num_extended_textual_headers", 304, Int16),
];

/// Trace header fields
pub const TRACE_HEADER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("trace_sequence_line", 0, Int32),
    FieldSpec::new("trace_sequence_file", 4, Int32),
    FieldSpec::new("field_record", 8, Int32),
    FieldSpec::new("trace_number", 12, Int32),
    FieldSpec::new("energy_source_point", 16, Int32),
    FieldSpec::new("cdp", 20, Int32),
    FieldSpec::new("cdp_trace", 24, Int32),
    FieldSpec::new("trace_identification_code", 28, Int16).with_default(Value::Int(1)),
    FieldSpec::new("summed_traces", 30, Int16),
    FieldSpec::new("stacked_traces", 32, Int16),
    FieldSpec::new("data_use", 34, Int16).with_default(Value::Int(1)),
    FieldSpec::new("offset", 36, Int32),
    FieldSpec::new("receiver_group_elevation", 40, Int32),
    FieldSpec::new("source_surface_elevation", 44, Int32),
    FieldSpec::new("source_depth", 48, Int32),
    FieldSpec::new("receiver_datum_elevation", 52, Int32),
    FieldSpec::new("source_datum_elevation", 56, Int32),
    FieldSpec::new("source_water_depth", 60, Int32),
    FieldSpec::new("group_water_depth", 64, Int32),
    FieldSpec::new("elevation_scalar", 68, Int16),
    FieldSpec::new("source_group_scalar", 70, Int16),
    FieldSpec::new("source_x", 72, Int32),
    FieldSpec::new("source_y", 76, Int32),
    FieldSpec::new("group_x", 80, Int32),
    FieldSpec::new("group_y", 84, Int32),
    FieldSpec::new("coordinate_units", 88, Int16),
    FieldSpec::new("weathering_velocity", 90, Int16),
    FieldSpec::new("sub_weathering_velocity", 92, Int16),
    FieldSpec::new("source_uphole_time", 94, Int16),
    FieldSpec::new("group_uphole_time", 96, Int16),
    FieldSpec::new("source_static_correction", 98, Int16),
    FieldSpec::new("group_static_correction", 100, Int16),
    FieldSpec::new("total_static_applied", 102, Int16),
    FieldSpec::new("lag_time_a", 104, Int16),
    FieldSpec::new("lag_time_b", 106, Int16),
    FieldSpec::new("delay_recording_time", 108, Int16),
    FieldSpec::new("mute_time_start", 110, Int16),
    FieldSpec::new("mute_time_end", 112, Int16),
    FieldSpec::new("ns", 114, UInt16),
    FieldSpec::new("dt", 116, Int16),
    FieldSpec::new("gain_type", 118, Int16),
    FieldSpec::new("instrument_gain_constant", 120, Int16),
    FieldSpec::new("instrument_initial_gain", 122, Int16),
    FieldSpec::new("correlated", 124, Int16),
    FieldSpec::new("sweep_frequency_start", 126, Int16),
    FieldSpec::new("sweep_frequency_end", 128, Int16),
    FieldSpec::new("sweep_length", 130, Int16),
    FieldSpec::new("sweep_type", 132, Int16),
    FieldSpec::new("sweep_trace_taper_length_start", 134, Int16),
    FieldSpec::new("sweep_trace_taper_length_end", 136, Int16),
    FieldSpec::new("taper_type", 138, Int16),
    FieldSpec::new("alias_filter_frequency", 140, Int16),
    FieldSpec::new("alias_filter_slope", 142, Int16),
    FieldSpec::new("notch_filter_frequency", 144, Int16),
    FieldSpec::new("notch_filter_slope", 146, Int16),
    FieldSpec::new("low_cut_frequency", 148, Int16),
    FieldSpec::new("high_cut_frequency", 150, Int16),
    FieldSpec::new("low_cut_slope", 152, Int16),
    FieldSpec::new("high_cut_slope", 154, Int16),
    FieldSpec::new("year_data_recorded", 156, Int16),
    FieldSpec::new("day_of_year", 158, Int16),
    FieldSpec::new("hour_of_day", 160, Int16),
    FieldSpec::new("minute_of_hour", 162, Int16),
    FieldSpec::new("second_of_minute", 164, Int16),
    FieldSpec::new("time_base_code", 166, Int16),
    FieldSpec::new("trace_weighting_factor", 168, Int16),
    FieldSpec::new("geophone_group_number_roll1", 170, Int16),
    FieldSpec::new("geophone_group_number_first_trace", 172, Int16),
    FieldSpec::new("geophone_group_number_last_trace", 174, Int16),
    FieldSpec::new("gap_size", 176, Int16),
    FieldSpec::new("over_travel", 178, Int16),
    FieldSpec::new("cdp_x", 180, Int32),
    FieldSpec::new("cdp_y", 184, Int32),
    FieldSpec::new("inline_3d", 188, Int32),
    FieldSpec::new("crossline_3d", 192, Int32),
    FieldSpec::new("shot_point", 196, Int32),
    FieldSpec::new("shot_point_scalar", 200, Int16),
    FieldSpec::new("trace_value_measurement_unit", 202, Int16),
    FieldSpec::new("transduction_constant_mantissa", 204, Int32),
    FieldSpec::new("transduction_constant_power", 208, Int16),
    FieldSpec::new("transduction_unit", 210, Int16),
    FieldSpec::new("trace_identifier", 212, Int16),
    FieldSpec::new("scalar_trace_header", 214, Int16),
    FieldSpec::new("source_type", 216, Int16),
    FieldSpec::new("source_energy_direction_mantissa", 218, Int32),
    FieldSpec::new("source_energy_direction_exponent", 222, Int16),
    FieldSpec::new("source_measurement_mantissa", 224, Int32),
    FieldSpec::new("source_measurement_exponent", 228, Int16),
    FieldSpec::new("source_measurement_unit", 230, Int16),
    FieldSpec::new("unassigned_1", 232, Int32),
    FieldSpec::new("unassigned_2", 236, Int32),
];

/// The standard binary reel header schema
pub const BINARY_REEL_HEADER: HeaderSchema<'static> = HeaderSchema::new(
    "binary reel header",
    BINARY_REEL_HEADER_LEN,
    BINARY_REEL_HEADER_FIELDS,
);

/// The standard trace header schema
pub const TRACE_HEADER: HeaderSchema<'static> =
    HeaderSchema::new("trace header", TRACE_HEADER_LEN, TRACE_HEADER_FIELDS);

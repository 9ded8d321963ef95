//! Binary reel header I/O
//!
//! The binary reel header occupies bytes 3200..3600, directly after the
//! textual reel header. Besides reading and writing it, this module derives
//! the facts every later stage needs: the canonical revision, the sample type
//! and its width, and the declared number of extended textual headers.

use crate::datatypes::LogicalType;
use crate::error::{Result, SegyError};
use crate::header::definitions::{BINARY_REEL_HEADER_LEN, TRACE_HEADER_LEN, names};
use crate::header::{HeaderLayout, Record};
use crate::ibm_float::OverflowPolicy;
use crate::revision::Revision;
use crate::text::textual::TEXTUAL_HEADER_LEN;
use crate::values::read_up_to;
use std::io::{Read, Seek, SeekFrom, Write};
use tracing::debug;

/// File offset of the binary reel header
pub const BINARY_REEL_HEADER_OFFSET: usize = TEXTUAL_HEADER_LEN;

/// Combined length of the textual and binary reel headers
pub const REEL_HEADER_LEN: usize = BINARY_REEL_HEADER_OFFSET + BINARY_REEL_HEADER_LEN;

/// Read and decode the binary reel header
///
/// `layout` is normally the compiled
/// [`BINARY_REEL_HEADER`](crate::header::definitions::BINARY_REEL_HEADER).
pub fn read_binary_reel_header<R: Read + Seek>(
    reader: &mut R,
    layout: &HeaderLayout,
) -> Result<Record> {
    reader.seek(SeekFrom::Start(BINARY_REEL_HEADER_OFFSET as u64))?;
    let raw = read_up_to(reader, layout.width())?;
    if raw.len() < layout.width() {
        return Err(SegyError::UnexpectedEndOfData {
            context: "binary reel header",
            expected: layout.width(),
            actual: raw.len(),
        });
    }
    layout.decode(&raw)
}

/// Encode and write the binary reel header
///
/// Fields absent from `record` are written with their declared defaults.
pub fn write_binary_reel_header<W: Write + Seek>(
    writer: &mut W,
    layout: &HeaderLayout,
    record: &Record,
    overflow: OverflowPolicy,
) -> Result<()> {
    let raw = layout.encode_with(record, overflow)?;
    writer.seek(SeekFrom::Start(BINARY_REEL_HEADER_OFFSET as u64))?;
    writer.write_all(&raw)?;
    Ok(())
}

/// Facts derived from a decoded binary reel header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelInfo {
    /// Canonical format revision
    pub revision: Revision,
    /// Type of every trace sample
    pub sample_type: LogicalType,
    /// Bytes per trace sample
    pub bytes_per_sample: usize,
    /// Nominal samples per trace; individual trace headers are authoritative
    pub samples_per_trace: usize,
    /// Declared extended textual header count, `-1` meaning "until end stanza"
    ///
    /// Always 0 for revision 0 files, whatever the field holds, since
    /// revision 0 has no extended textual headers.
    pub num_extended_textual_headers: i64,
}

impl ReelInfo {
    /// Derive the reel facts from a decoded binary reel header
    pub fn from_record(record: &Record) -> Result<Self> {
        let revision = Revision::canonicalize(record.get_i64(names::SEGY_FORMAT_REVISION)?)?;
        let sample_type =
            LogicalType::from_sample_format(record.get_i64(names::DATA_SAMPLE_FORMAT)?, revision)?;
        let ns = record.get_i64(names::NS)?;
        let samples_per_trace = usize::try_from(ns).map_err(|_| SegyError::ValueOutOfRange {
            value: ns as f64,
            type_name: "samples per trace",
            min: 0.0,
            max: f64::from(u16::MAX),
        })?;

        // Revision 0 has no extended textual headers and the field may hold junk
        let num_extended_textual_headers = match revision {
            Revision::Rev0 => 0,
            Revision::Rev1 => record.get_i64(names::NUM_EXTENDED_TEXTUAL_HEADERS)?,
        };

        let info = Self {
            revision,
            sample_type,
            bytes_per_sample: sample_type.width(),
            samples_per_trace,
            num_extended_textual_headers,
        };
        debug!("Binary reel header: {:?}", info);
        Ok(info)
    }

    /// Nominal length in bytes of one trace record, header included
    pub const fn trace_length_bytes(&self) -> usize {
        TRACE_HEADER_LEN + self.samples_per_trace * self.bytes_per_sample
    }
}

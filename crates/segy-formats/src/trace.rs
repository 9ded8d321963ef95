//! Trace header and sample I/O
//!
//! Trace records are a 240-byte trace header followed by `ns` samples. The
//! positions come from the offset catalog, so every function here takes an
//! absolute file offset of the trace header.

use crate::datatypes::{ByteOrder, LogicalType, Value};
use crate::error::{Result, SegyError};
use crate::header::definitions::TRACE_HEADER_LEN;
use crate::header::{HeaderLayout, Record};
use crate::ibm_float::OverflowPolicy;
use crate::values::{read_up_to, read_values_at, write_values_at};
use std::io::{Read, Seek, SeekFrom, Write};

/// Read and decode the trace header at `pos`
pub fn read_trace_header<R: Read + Seek>(
    reader: &mut R,
    layout: &HeaderLayout,
    pos: u64,
) -> Result<Record> {
    reader.seek(SeekFrom::Start(pos))?;
    let raw = read_up_to(reader, layout.width())?;
    if raw.len() < layout.width() {
        return Err(SegyError::UnexpectedEndOfData {
            context: "trace header",
            expected: layout.width(),
            actual: raw.len(),
        });
    }
    layout.decode(&raw)
}

/// Encode and write a trace header at `pos`
pub fn write_trace_header<W: Write + Seek>(
    writer: &mut W,
    layout: &HeaderLayout,
    record: &Record,
    pos: u64,
    overflow: OverflowPolicy,
) -> Result<()> {
    let raw = layout.encode_with(record, overflow)?;
    writer.seek(SeekFrom::Start(pos))?;
    writer.write_all(&raw)?;
    Ok(())
}

/// Offset of the first sample of the trace whose header starts at `pos`
pub const fn samples_offset(pos: u64) -> u64 {
    pos + TRACE_HEADER_LEN as u64
}

/// Read the `ns` samples of the trace whose header starts at `pos`
pub fn read_trace_samples<R: Read + Seek>(
    reader: &mut R,
    pos: u64,
    ns: usize,
    sample_type: LogicalType,
    order: ByteOrder,
) -> Result<Vec<Value>> {
    read_values_at(reader, samples_offset(pos), sample_type, ns, order)
}

/// Write samples for the trace whose header starts at `pos`
pub fn write_trace_samples<W: Write + Seek>(
    writer: &mut W,
    pos: u64,
    samples: &[Value],
    sample_type: LogicalType,
    order: ByteOrder,
    overflow: OverflowPolicy,
) -> Result<()> {
    write_values_at(writer, samples_offset(pos), sample_type, samples, order, overflow)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::header::compile;
    use crate::header::definitions::{TRACE_HEADER, names};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_trace_round_trip() {
        let layout = compile(&TRACE_HEADER, ByteOrder::Big).expect("trace header");
        let mut file = Cursor::new(Vec::new());
        let pos = 3600;
        let samples: Vec<Value> = [1.0f32, -118.625, 0.5].into_iter().map(Value::from).collect();

        let header = Record::new().with(names::NS, 3).with(names::CDP, 17);
        write_trace_header(&mut file, &layout, &header, pos, OverflowPolicy::Reject)
            .expect("header");
        write_trace_samples(
            &mut file,
            pos,
            &samples,
            LogicalType::IbmFloat32,
            ByteOrder::Big,
            OverflowPolicy::Reject,
        )
        .expect("samples");
        assert_eq!(file.get_ref().len(), 3600 + 240 + 12);
        assert_eq!(&file.get_ref()[3840..3844], &[0x41, 0x10, 0x00, 0x00]);

        let decoded = read_trace_header(&mut file, &layout, pos).expect("header");
        assert_eq!(decoded.get_i64(names::CDP).expect("cdp"), 17);
        let ns = usize::try_from(decoded.get_i64(names::NS).expect("ns")).expect("non-negative");
        let read = read_trace_samples(&mut file, pos, ns, LogicalType::IbmFloat32, ByteOrder::Big)
            .expect("samples");
        assert_eq!(read, samples);
    }

    #[test]
    fn test_truncated_samples() {
        let mut file = Cursor::new(vec![0u8; 240 + 6]);
        let err = read_trace_samples(&mut file, 0, 4, LogicalType::Int16, ByteOrder::Big)
            .expect_err("two samples short");
        assert!(err.is_end_of_data());
    }

    #[test]
    fn test_truncated_header() {
        let layout = compile(&TRACE_HEADER, ByteOrder::Little).expect("trace header");
        let mut file = Cursor::new(vec![0u8; 100]);
        assert!(read_trace_header(&mut file, &layout, 0)
            .expect_err("short")
            .is_end_of_data());
    }
}

//! Integration tests over synthetic SEG-Y files
//!
//! Each test writes a complete file to a temporary path with the crate's own
//! writers, reopens it and walks it the way a reader would: binary reel
//! header, extended textual headers, trace catalogs, then random access.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use pretty_assertions::assert_eq;
use segy_formats::catalog::{DenseCatalog, LineKeySource, NoProgress, catalog_traces};
use segy_formats::header::definitions::{BINARY_REEL_HEADER, TRACE_HEADER, names};
use segy_formats::header::{HeaderLayout, LayoutCache, Record};
use segy_formats::reel::{ReelInfo, read_binary_reel_header, write_binary_reel_header};
use segy_formats::text::{
    format_extended_textual_header, read_extended_textual_headers, read_textual_reel_header,
    write_extended_textual_headers, write_textual_reel_header,
};
use segy_formats::trace::{read_trace_header, read_trace_samples, write_trace_header, write_trace_samples};
use segy_formats::values::read_values_at;
use segy_formats::{ByteOrder, LogicalType, OverflowPolicy, SegyConfig, TextEncoding, Value};
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("segy_formats=debug")
        .with_test_writer()
        .try_init();
}

struct Layouts {
    reel: Arc<HeaderLayout>,
    trace: Arc<HeaderLayout>,
}

fn layouts(order: ByteOrder) -> Layouts {
    let mut cache = LayoutCache::new();
    Layouts {
        reel: cache
            .get_or_compile(&BINARY_REEL_HEADER, order)
            .expect("reel header"),
        trace: cache.get_or_compile(&TRACE_HEADER, order).expect("trace header"),
    }
}

struct TraceFixture {
    ns: i64,
    cdp: i64,
    inline: i64,
    crossline: i64,
}

/// Write a file with the given reel header fields, extended pages and traces
fn write_file(
    file: &mut File,
    config: &SegyConfig,
    reel: Record,
    extended: &[Vec<String>],
    traces: &[TraceFixture],
    sample_type: LogicalType,
) -> Vec<u64> {
    let encoding = config.encoding.unwrap_or(TextEncoding::Ebcdic);
    let layouts = layouts(config.byte_order);

    write_textual_reel_header(file, &["C 1 SYNTHETIC SURVEY"], encoding).expect("textual");
    write_binary_reel_header(file, &layouts.reel, &reel, config.overflow).expect("binary");
    write_extended_textual_headers(file, extended, encoding).expect("extended");

    let mut pos = file.seek(SeekFrom::End(0)).expect("seek");
    let mut positions = Vec::new();
    for (i, fixture) in traces.iter().enumerate() {
        let header = Record::new()
            .with(names::TRACE_SEQUENCE_FILE, i as i64 + 1)
            .with(names::NS, fixture.ns)
            .with(names::CDP, fixture.cdp)
            .with(names::INLINE_3D, fixture.inline)
            .with(names::CROSSLINE_3D, fixture.crossline);
        write_trace_header(file, &layouts.trace, &header, pos, config.overflow).expect("header");

        let samples: Vec<Value> = (0..fixture.ns)
            .map(|s| Value::from((i as i64 * 100 + s) as f32))
            .collect();
        write_trace_samples(
            file,
            pos,
            &samples,
            sample_type,
            config.byte_order,
            config.overflow,
        )
        .expect("samples");

        positions.push(pos);
        pos += 240 + fixture.ns as u64 * sample_type.width() as u64;
    }
    file.flush().expect("flush");
    positions
}

fn fixture(ns: i64, cdp: i64, inline: i64, crossline: i64) -> TraceFixture {
    TraceFixture {
        ns,
        cdp,
        inline,
        crossline,
    }
}

fn create_temp() -> (tempfile::TempDir, std::path::PathBuf, File) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("synthetic.sgy");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .expect("create file");
    (dir, path, file)
}

#[test]
fn single_ibm_trace() {
    init_tracing();
    let config = SegyConfig::new();
    let (_dir, path, mut file) = create_temp();
    let reel = Record::new().with(names::NS, 4).with(names::DATA_SAMPLE_FORMAT, 1);
    write_file(&mut file, &config, reel, &[], &[fixture(4, 1, 1, 1)], LogicalType::IbmFloat32);
    drop(file);

    let mut file = File::open(&path).expect("reopen");
    assert_eq!(file.metadata().expect("metadata").len(), 3600 + 240 + 16);

    let layouts = layouts(ByteOrder::Big);
    let info = ReelInfo::from_record(&read_binary_reel_header(&mut file, &layouts.reel).expect("reel"))
        .expect("reel info");
    assert_eq!(info.bytes_per_sample, 4);
    assert_eq!(info.sample_type, LogicalType::IbmFloat32);

    let extended =
        read_extended_textual_headers(&mut file, info.num_extended_textual_headers, &TextEncoding::Ebcdic.into())
            .expect("no extended headers");
    assert!(extended.is_empty());

    let catalogs =
        catalog_traces(&mut file, info.bytes_per_sample, &layouts.trace, NoProgress).expect("scan");
    assert_eq!(catalogs.offsets.get(0), Some(3600));
    assert_eq!(catalogs.offsets.len(), 1);
    assert_eq!(catalogs.lengths.get(0), Some(4));
    assert_eq!(catalogs.cdp.as_ref().and_then(|c| c.get(&1)), Some(0));

    let samples = read_trace_samples(&mut file, 3600, 4, info.sample_type, ByteOrder::Big)
        .expect("samples");
    assert_eq!(
        samples,
        vec![Value::from(0.0f32), Value::from(1.0f32), Value::from(2.0f32), Value::from(3.0f32)]
    );

    let textual = read_textual_reel_header(&mut file, &TextEncoding::Ebcdic.into()).expect("textual");
    assert_eq!(textual[0].trim_end(), "C 1 SYNTHETIC SURVEY");
}

#[test]
fn extended_headers_and_variable_traces() {
    init_tracing();
    let config = SegyConfig::new().with_encoding(TextEncoding::Ascii);
    let (_dir, path, mut file) = create_temp();

    let pages = format_extended_textual_header(
        "Processing history\nStack, migration",
        TextEncoding::Ascii,
        true,
    )
    .expect("format");
    let reel = Record::new()
        .with(names::NS, 8)
        .with(names::DATA_SAMPLE_FORMAT, 3)
        .with(names::NUM_EXTENDED_TEXTUAL_HEADERS, -1);
    let traces = [fixture(8, 10, 100, 1), fixture(3, 11, 100, 2), fixture(5, 12, 101, 1)];
    let positions = write_file(&mut file, &config, reel, &pages, &traces, LogicalType::Int16);
    drop(file);

    let mut file = File::open(&path).expect("reopen");
    let layouts = layouts(config.byte_order);
    let info = ReelInfo::from_record(&read_binary_reel_header(&mut file, &layouts.reel).expect("reel"))
        .expect("reel info");
    assert_eq!(info.num_extended_textual_headers, -1);

    let guesser = |raw: &[u8]| {
        if raw.iter().all(u8::is_ascii) {
            Some("ascii".to_string())
        } else {
            Some("cp037".to_string())
        }
    };
    let extended = read_extended_textual_headers(
        &mut file,
        info.num_extended_textual_headers,
        &config.encoding_source(&guesser),
    )
    .expect("extended");
    assert_eq!(extended.len(), 1);
    assert_eq!(extended.pages[0][1].trim_end(), "Stack, migration");
    assert_eq!(file.stream_position().expect("position"), 3600 + 2 * 3200);

    let mut seen = Vec::new();
    let catalogs = catalog_traces(&mut file, info.bytes_per_sample, &layouts.trace, |p: f64| {
        seen.push(p);
    })
    .expect("scan");

    assert_eq!(catalogs.offsets, DenseCatalog::Explicit(positions));
    assert_eq!(catalogs.lengths.iter().collect::<Vec<_>>(), vec![8, 3, 5]);
    assert_eq!(catalogs.line_source, Some(LineKeySource::InlineCrossline));
    let line = catalogs.line.as_ref().expect("line catalog");
    assert_eq!(line.get(&(101, 1)), Some(2));
    assert_eq!(seen.last(), Some(&1.0));
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));

    // Random access to the middle trace through the catalogs
    let ordinal = catalogs.cdp.as_ref().and_then(|c| c.get(&11)).expect("cdp 11");
    let pos = catalogs.offsets.get(ordinal).expect("offset");
    let header = read_trace_header(&mut file, &layouts.trace, pos).expect("header");
    assert_eq!(header.get_i64(names::CROSSLINE_3D).expect("crossline"), 2);
    let ns = catalogs.lengths.get(ordinal).expect("length") as usize;
    let samples = read_trace_samples(&mut file, pos, ns, LogicalType::Int16, ByteOrder::Big)
        .expect("samples");
    assert_eq!(samples, vec![Value::Int(100), Value::Int(101), Value::Int(102)]);
}

#[test]
fn little_endian_two_dimensional_line() {
    init_tracing();
    let config = SegyConfig::new()
        .with_byte_order(ByteOrder::Little)
        .with_encoding(TextEncoding::Ascii);
    let (_dir, path, mut file) = create_temp();

    let reel = Record::new().with(names::NS, 2).with(names::DATA_SAMPLE_FORMAT, 5);
    // 2-D lines leave inline/crossline unset; CDPs repeat across the line
    let traces = [fixture(2, 1, 0, 0), fixture(2, 1, 0, 0), fixture(2, 2, 0, 0)];
    write_file(&mut file, &config, reel, &[], &traces, LogicalType::IeeeFloat32);
    drop(file);

    let mut file = File::open(&path).expect("reopen");
    let layouts = layouts(ByteOrder::Little);
    let info = ReelInfo::from_record(&read_binary_reel_header(&mut file, &layouts.reel).expect("reel"))
        .expect("reel info");
    assert_eq!(info.sample_type, LogicalType::IeeeFloat32);
    read_extended_textual_headers(&mut file, info.num_extended_textual_headers, &TextEncoding::Ascii.into())
        .expect("extended");

    let catalogs =
        catalog_traces(&mut file, info.bytes_per_sample, &layouts.trace, NoProgress).expect("scan");
    assert_eq!(
        catalogs.offsets,
        DenseCatalog::Regular {
            start: 3600,
            step: 248,
            len: 3
        }
    );
    assert!(catalogs.cdp.is_none());
    assert_eq!(catalogs.line_source, Some(LineKeySource::SequenceCdp));
    assert_eq!(catalogs.line.as_ref().and_then(|l| l.get(&(3, 2))), Some(2));

    let raw = read_values_at(&mut file, 3600 + 240, LogicalType::IeeeFloat32, 2, ByteOrder::Little)
        .expect("samples");
    assert_eq!(raw, vec![Value::from(0.0f32), Value::from(1.0f32)]);
}

#[test]
fn truncated_trace_region_stops_at_last_full_header() {
    init_tracing();
    let config = SegyConfig::new();
    let (_dir, path, mut file) = create_temp();
    let reel = Record::new().with(names::NS, 1).with(names::DATA_SAMPLE_FORMAT, 2);
    write_file(&mut file, &config, reel, &[], &[fixture(1, 5, 1, 1)], LogicalType::Int32);
    file.write_all(&[0u8; 120]).expect("partial header");
    drop(file);

    let mut file = File::open(&path).expect("reopen");
    file.seek(SeekFrom::Start(3600)).expect("seek");
    let catalogs = catalog_traces(&mut file, 4, &layouts(ByteOrder::Big).trace, NoProgress)
        .expect("scan");
    assert_eq!(catalogs.trace_count(), 1);
}

#[test]
fn declared_extended_headers_missing() {
    init_tracing();
    let config = SegyConfig::new();
    let (_dir, path, mut file) = create_temp();
    let reel = Record::new()
        .with(names::NS, 1)
        .with(names::NUM_EXTENDED_TEXTUAL_HEADERS, 2);
    write_file(&mut file, &config, reel, &[], &[], LogicalType::IbmFloat32);
    drop(file);

    let mut file = File::open(&path).expect("reopen");
    let layouts = layouts(ByteOrder::Big);
    let info = ReelInfo::from_record(&read_binary_reel_header(&mut file, &layouts.reel).expect("reel"))
        .expect("reel info");
    let err = read_extended_textual_headers(
        &mut file,
        info.num_extended_textual_headers,
        &TextEncoding::Ebcdic.into(),
    )
    .expect_err("pages missing");
    assert!(err.is_end_of_data());
}

#[test]
fn ibm_overflow_policy_applies_to_samples() {
    let (_dir, _path, mut file) = create_temp();
    let huge = [Value::Float(1.0e300)];
    let rejected = write_trace_samples(
        &mut file,
        3600,
        &huge,
        LogicalType::IbmFloat32,
        ByteOrder::Big,
        OverflowPolicy::Reject,
    );
    assert!(matches!(rejected, Err(segy_formats::SegyError::Overflow(_))));

    write_trace_samples(
        &mut file,
        3600,
        &huge,
        LogicalType::IbmFloat32,
        ByteOrder::Big,
        OverflowPolicy::Clamp,
    )
    .expect("clamped");
    let values = read_values_at(&mut file, 3840, LogicalType::IbmFloat32, 1, ByteOrder::Big)
        .expect("read back");
    // The IBM maximum exceeds f32 and decodes to infinity in single precision
    assert_eq!(values, vec![Value::Float(f64::INFINITY)]);
}

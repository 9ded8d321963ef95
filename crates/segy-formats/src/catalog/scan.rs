//! Single pass trace scanner
//!
//! Walks trace records from the current stream position to end of file,
//! reading only the five trace header fields the catalogs need and skipping
//! each trace's samples using `ns * bytes_per_sample`.

use crate::catalog::builder::{Catalog, CatalogBuilder, DenseCatalog, DenseCatalogBuilder};
use crate::datatypes::Value;
use crate::error::{Result, SegyError};
use crate::header::definitions::names;
use crate::header::{FieldSlot, HeaderLayout};
use crate::values::read_up_to;
use std::io::{Read, Seek, SeekFrom};
use std::ops::ControlFlow;
use tracing::{debug, info};

/// Share of reported progress spent reading the file
const READ_PROPORTION: f64 = 0.75;

/// Key of the line catalog
pub type LineKey = (i64, i64);

/// Receives scan progress as a fraction in `[0, 1]`
///
/// Implemented for any `FnMut(f64)`, which never cancels. Wrap a
/// `FnMut(f64) -> ControlFlow<()>` in [`Cancellable`] to be able to stop the
/// scan.
pub trait Progress {
    /// Report progress, returning `Break` to cancel the scan
    fn report(&mut self, fraction: f64) -> ControlFlow<()>;
}

impl<F: FnMut(f64)> Progress for F {
    fn report(&mut self, fraction: f64) -> ControlFlow<()> {
        self(fraction);
        ControlFlow::Continue(())
    }
}

/// Progress sink that can cancel the scan
pub struct Cancellable<F>(pub F);

impl<F: FnMut(f64) -> ControlFlow<()>> Progress for Cancellable<F> {
    fn report(&mut self, fraction: f64) -> ControlFlow<()> {
        (self.0)(fraction)
    }
}

/// Progress sink that ignores all reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f64) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Which trace header fields keyed the line catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKeySource {
    /// `(inline_3d, crossline_3d)`
    InlineCrossline,
    /// `(trace_sequence_file, cdp)`, used by some 3-D files for line numbers
    SequenceCdp,
}

/// The four catalogs produced by one scan
///
/// All share trace ordinals `0..trace_count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceCatalogs {
    /// Ordinal to file offset of the trace header
    pub offsets: DenseCatalog,
    /// Ordinal to number of samples
    pub lengths: DenseCatalog,
    /// CDP number to ordinal, absent when CDP numbers are not unique
    pub cdp: Option<Catalog<i64>>,
    /// Line coordinates to ordinal, absent when neither key scheme is unique
    pub line: Option<Catalog<LineKey>>,
    /// Key scheme of `line`
    pub line_source: Option<LineKeySource>,
}

impl TraceCatalogs {
    /// Number of traces found
    pub fn trace_count(&self) -> usize {
        self.offsets.len()
    }
}

struct KeySlots {
    ns: FieldSlot,
    cdp: FieldSlot,
    inline: FieldSlot,
    crossline: FieldSlot,
    sequence: FieldSlot,
}

impl KeySlots {
    fn from_layout(layout: &HeaderLayout) -> Result<Self> {
        Ok(Self {
            ns: layout.require_slot(names::NS)?,
            cdp: layout.require_slot(names::CDP)?,
            inline: layout.require_slot(names::INLINE_3D)?,
            crossline: layout.require_slot(names::CROSSLINE_3D)?,
            sequence: layout.require_slot(names::TRACE_SEQUENCE_FILE)?,
        })
    }
}

fn integer(value: Value, field: &'static str) -> Result<i64> {
    value.as_i64().ok_or(SegyError::ValueOutOfRange {
        value: value.as_f64(),
        type_name: field,
        min: i64::MIN as f64,
        max: i64::MAX as f64,
    })
}

fn report<P: Progress>(progress: &mut P, fraction: f64, traces_scanned: usize) -> Result<()> {
    match progress.report(fraction) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => {
            debug!("Trace scan cancelled at {:.3}", fraction);
            Err(SegyError::ScanCancelled { traces_scanned })
        }
    }
}

/// Build the trace catalogs in one forward pass
///
/// The reader must be positioned at the first trace header, as left by
/// [`read_extended_textual_headers`](crate::text::read_extended_textual_headers).
/// `bps` is the number of bytes per sample and `layout` the compiled trace
/// header, which must contain `ns`, `cdp`, `inline_3d`, `crossline_3d` and
/// `trace_sequence_file`. A trace header cut short by end of file ends the
/// scan.
pub fn catalog_traces<R, P>(
    reader: &mut R,
    bps: usize,
    layout: &HeaderLayout,
    mut progress: P,
) -> Result<TraceCatalogs>
where
    R: Read + Seek,
    P: Progress,
{
    let slots = KeySlots::from_layout(layout)?;

    let mut pos = reader.stream_position()?;
    let file_length = reader.seek(SeekFrom::End(0))?;
    debug!(
        "Cataloging traces from offset {} of {} bytes, {} bytes per sample",
        pos, file_length, bps
    );

    let mut offsets = DenseCatalogBuilder::new();
    let mut lengths = DenseCatalogBuilder::new();
    let mut cdps = CatalogBuilder::new();
    let mut lines = CatalogBuilder::new();
    let mut alt_lines = CatalogBuilder::new();

    loop {
        let fraction = if file_length == 0 {
            0.0
        } else {
            READ_PROPORTION * pos.min(file_length) as f64 / file_length as f64
        };
        report(&mut progress, fraction, offsets.len())?;

        reader.seek(SeekFrom::Start(pos))?;
        let raw = read_up_to(reader, layout.width())?;
        if raw.len() < layout.width() {
            break;
        }

        let ns = integer(layout.read_slot(&raw, slots.ns)?, names::NS)?;
        let samples = u64::try_from(ns).map_err(|_| SegyError::ValueOutOfRange {
            value: ns as f64,
            type_name: names::NS,
            min: 0.0,
            max: u64::MAX as f64,
        })?;
        let cdp = integer(layout.read_slot(&raw, slots.cdp)?, names::CDP)?;
        let inline = integer(layout.read_slot(&raw, slots.inline)?, names::INLINE_3D)?;
        let crossline = integer(layout.read_slot(&raw, slots.crossline)?, names::CROSSLINE_3D)?;
        let sequence = integer(
            layout.read_slot(&raw, slots.sequence)?,
            names::TRACE_SEQUENCE_FILE,
        )?;

        let ordinal = offsets.add(pos);
        lengths.add(samples);
        lines.add((inline, crossline), ordinal);
        alt_lines.add((sequence, cdp), ordinal);
        cdps.add(cdp, ordinal);

        pos = samples
            .checked_mul(bps as u64)
            .and_then(|body| body.checked_add(layout.width() as u64))
            .and_then(|record| pos.checked_add(record))
            .ok_or(SegyError::ValueOutOfRange {
                value: ns as f64,
                type_name: names::NS,
                min: 0.0,
                max: ((u64::MAX - pos) / bps.max(1) as u64) as f64,
            })?;
    }

    let traces = offsets.len();
    report(&mut progress, READ_PROPORTION, traces)?;

    let offsets = offsets.create();
    report(&mut progress, READ_PROPORTION + (1.0 - READ_PROPORTION) / 4.0, traces)?;

    let lengths = lengths.create();
    report(&mut progress, READ_PROPORTION + (1.0 - READ_PROPORTION) / 2.0, traces)?;

    let cdp = cdps.create();
    if cdp.is_none() && traces > 0 {
        debug!("CDP numbers are not unique, no CDP catalog");
    }
    report(&mut progress, READ_PROPORTION + (1.0 - READ_PROPORTION) * 3.0 / 4.0, traces)?;

    let (line, line_source) = match lines.create() {
        Some(catalog) => (Some(catalog), Some(LineKeySource::InlineCrossline)),
        None => match alt_lines.create() {
            Some(catalog) => {
                debug!("Inline/crossline keys not unique, line catalog keyed by sequence and CDP");
                (Some(catalog), Some(LineKeySource::SequenceCdp))
            }
            None => {
                if traces > 0 {
                    debug!("No unique line key scheme, no line catalog");
                }
                (None, None)
            }
        },
    };
    report(&mut progress, 1.0, traces)?;

    info!("Cataloged {} traces", traces);
    Ok(TraceCatalogs {
        offsets,
        lengths,
        cdp,
        line,
        line_source,
    })
}

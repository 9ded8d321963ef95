//! Reading, writing and indexing of SEG-Y seismic data files
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format packing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_sign_loss)] // Range checked before narrowing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::cast_precision_loss)] // Progress fractions and range reporting
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many SEG-Y terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::float_cmp)] // Exact float codec comparisons
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::missing_errors_doc)] // Errors documented on SegyError
#![allow(clippy::must_use_candidate)] // Accessors
//! SEG-Y is a fixed-layout container for seismic traces:
//!
//! ```text
//! 0      3200-byte textual reel header (EBCDIC or ASCII card images)
//! 3200   400-byte binary reel header
//! 3600   zero or more 3200-byte extended textual headers
//! ...    trace records: 240-byte trace header + ns samples each
//! ```
//!
//! # Modules
//!
//! - **datatypes** / **revision**: logical field and sample types, data
//!   sample format codes, format revisions
//! - **ibm_float**: IBM System/360 hexadecimal floats to and from IEEE 754
//! - **values**: endian-aware packing of typed value sequences
//! - **header**: field schemas compiled into byte-exact header layouts, with
//!   the standard binary reel header and trace header tables
//! - **text**: textual reel header and extended textual headers
//! - **reel** / **trace**: positioned header and sample I/O
//! - **catalog**: single-pass trace scanning into random access catalogs
//! - **config**: overrides for non-standard files
//!
//! # Example
//!
//! ```no_run
//! use segy_formats::catalog::{NoProgress, catalog_traces};
//! use segy_formats::header::{LayoutCache, definitions::{BINARY_REEL_HEADER, TRACE_HEADER}};
//! use segy_formats::reel::{ReelInfo, read_binary_reel_header};
//! use segy_formats::text::read_extended_textual_headers;
//! use segy_formats::{SegyConfig, TextEncoding};
//!
//! # fn main() -> segy_formats::Result<()> {
//! let config = SegyConfig::new().with_encoding(TextEncoding::Ebcdic);
//! let mut file = std::fs::File::open("survey.sgy")?;
//!
//! let mut layouts = LayoutCache::new();
//! let reel_layout = layouts.get_or_compile(&BINARY_REEL_HEADER, config.byte_order)?;
//! let trace_layout = layouts.get_or_compile(&TRACE_HEADER, config.byte_order)?;
//!
//! let reel = ReelInfo::from_record(&read_binary_reel_header(&mut file, &reel_layout)?)?;
//! let source = TextEncoding::Ebcdic.into();
//! read_extended_textual_headers(&mut file, reel.num_extended_textual_headers, &source)?;
//!
//! let catalogs = catalog_traces(
//!     &mut file,
//!     config.resolve_bytes_per_sample(reel.bytes_per_sample),
//!     &trace_layout,
//!     NoProgress,
//! )?;
//! println!("{} traces", catalogs.trace_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Trace catalogs built by a single forward scan
pub mod catalog;
/// Reader and writer configuration
pub mod config;
/// Logical types of header fields and trace samples
pub mod datatypes;
pub mod error;
/// Fixed-width binary header schemas and compiled layouts
pub mod header;
/// IBM hexadecimal floating point conversion
pub mod ibm_float;
pub mod reel;
pub mod revision;
/// Textual reel header and extended textual headers
pub mod text;
pub mod trace;
pub mod values;

pub use config::SegyConfig;
pub use datatypes::{ByteOrder, LogicalType, Value};
pub use error::{Result, SegyError};
pub use ibm_float::OverflowPolicy;
pub use revision::Revision;
pub use text::TextEncoding;

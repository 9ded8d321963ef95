//! Fixed-width binary header schemas and layouts
//!
//! SEG-Y has two binary headers, the 400-byte binary reel header and the
//! 240-byte trace header. Both are described by a table of named fields at
//! fixed byte offsets. A table is compiled once per byte order into a
//! [`HeaderLayout`], an ordered run of field and gap segments that covers the
//! header exactly, and the layout then decodes headers into [`Record`]s and
//! encodes them back.
//!
//! # Example
//!
//! ```
//! use segy_formats::datatypes::ByteOrder;
//! use segy_formats::header::{Record, compile, definitions::{TRACE_HEADER, names}};
//!
//! let layout = compile(&TRACE_HEADER, ByteOrder::Big).expect("standard table compiles");
//! let bytes = layout
//!     .encode(&Record::new().with(names::NS, 1500).with(names::CDP, 42))
//!     .expect("values in range");
//! assert_eq!(bytes.len(), 240);
//!
//! let record = layout.decode(&bytes).expect("240 bytes");
//! assert_eq!(record.get_i64(names::NS).expect("ns present"), 1500);
//! ```

pub mod cache;
pub mod definitions;
pub mod layout;
pub mod schema;

pub use cache::LayoutCache;
pub use layout::{FieldSlot, HeaderLayout, Record, Segment, compile};
pub use schema::{FieldSpec, HeaderSchema};

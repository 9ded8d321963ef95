//! Compilation of field schemas into byte-exact header layouts

use crate::datatypes::{ByteOrder, LogicalType, Value};
use crate::error::{Result, SegyError};
use crate::header::schema::{FieldSpec, HeaderSchema};
use crate::ibm_float::OverflowPolicy;
use crate::values::{read_one, write_one};
use binrw::Endian;
use binrw::io::Cursor;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// One contiguous run of header bytes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Unassigned bytes, skipped on decode and zero-filled on encode
    Gap(usize),
    /// A schema field
    Field(FieldSpec),
}

impl Segment {
    /// Length of the segment in bytes
    pub const fn len(&self) -> usize {
        match self {
            Self::Gap(len) => *len,
            Self::Field(field) => field.field_type.width(),
        }
    }

    /// Whether the segment covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Position and type of a single field within a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    /// Byte offset from the start of the header
    pub offset: usize,
    /// Physical encoding
    pub field_type: LogicalType,
}

/// A decoded header: field name to value
///
/// Records are short-lived; they exist between one decode and one encode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if present
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Integral value of a field
    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.get(name)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| SegyError::MissingField(name.to_string()))
    }

    /// Set a field, returning the previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder-style [`Record::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over fields in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// A compiled header layout
///
/// Produced by [`compile`]. The segments tile exactly `width` bytes, so
/// decoding and encoding never encounter a layout error.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    name: &'static str,
    width: usize,
    order: ByteOrder,
    segments: Vec<Segment>,
    slots: HashMap<&'static str, FieldSlot>,
}

/// Compile `schema` into a layout for byte order `order`
///
/// Fields are sorted by offset and the spaces between them become gaps. The
/// schema is rejected if two fields share a name, if fields overlap, or if
/// the fields do not fit inside the declared width.
pub fn compile(schema: &HeaderSchema<'_>, order: ByteOrder) -> Result<HeaderLayout> {
    let layout_error = |reason: String| SegyError::SchemaLayout {
        schema: schema.name.to_string(),
        width: schema.width,
        reason,
    };

    let mut names = HashSet::with_capacity(schema.fields.len());
    for field in schema.fields {
        if !names.insert(field.name) {
            return Err(layout_error(format!("duplicate field {:?}", field.name)));
        }
    }

    let mut fields = schema.fields.to_vec();
    fields.sort_by_key(|f| f.offset);

    let mut segments = Vec::with_capacity(fields.len() * 2 + 1);
    let mut slots = HashMap::with_capacity(fields.len());
    let mut cursor = 0usize;

    for field in fields {
        if field.offset < cursor {
            return Err(layout_error(format!(
                "field {:?} at offset {} overlaps bytes up to {}",
                field.name, field.offset, cursor
            )));
        }
        if field.offset > cursor {
            segments.push(Segment::Gap(field.offset - cursor));
        }
        segments.push(Segment::Field(field));
        slots.insert(
            field.name,
            FieldSlot {
                offset: field.offset,
                field_type: field.field_type,
            },
        );
        cursor = field.end();
        if cursor > schema.width {
            return Err(layout_error(format!(
                "field {:?} ends at byte {}",
                field.name, cursor
            )));
        }
    }

    if cursor < schema.width {
        segments.push(Segment::Gap(schema.width - cursor));
    }

    debug_assert_eq!(
        segments.iter().map(Segment::len).sum::<usize>(),
        schema.width
    );

    Ok(HeaderLayout {
        name: schema.name,
        width: schema.width,
        order,
        segments,
        slots,
    })
}

impl HeaderLayout {
    /// Name of the schema the layout was compiled from
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Header width in bytes
    pub fn width(&self) -> usize {
        self.width
    }

    /// Byte order of multi-byte fields
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Segments in file order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Position and type of a field
    pub fn slot(&self, name: &str) -> Option<FieldSlot> {
        self.slots.get(name).copied()
    }

    /// Like [`HeaderLayout::slot`] but a missing field is an error
    pub fn require_slot(&self, name: &str) -> Result<FieldSlot> {
        self.slot(name)
            .ok_or_else(|| SegyError::MissingField(name.to_string()))
    }

    fn check_len(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() == self.width {
            Ok(())
        } else {
            Err(SegyError::UnexpectedEndOfData {
                context: self.name,
                expected: self.width,
                actual: bytes.len(),
            })
        }
    }

    /// Decode every field of a header
    pub fn decode(&self, bytes: &[u8]) -> Result<Record> {
        self.check_len(bytes)?;
        let endian = Endian::from(self.order);
        let mut record = Record {
            values: HashMap::with_capacity(self.slots.len()),
        };

        let mut pos = 0;
        for segment in &self.segments {
            if let Segment::Field(field) = segment {
                let mut cursor = Cursor::new(&bytes[pos..pos + segment.len()]);
                let value = read_one(&mut cursor, field.field_type, endian)?;
                record.values.insert(field.name.to_string(), value);
            }
            pos += segment.len();
        }
        Ok(record)
    }

    /// Decode a single field located by [`HeaderLayout::slot`]
    pub fn read_slot(&self, bytes: &[u8], slot: FieldSlot) -> Result<Value> {
        self.check_len(bytes)?;
        let end = slot.offset + slot.field_type.width();
        let mut cursor = Cursor::new(&bytes[slot.offset..end]);
        read_one(&mut cursor, slot.field_type, Endian::from(self.order))
    }

    /// Decode a single field by name
    pub fn read_field(&self, bytes: &[u8], name: &str) -> Result<Value> {
        self.read_slot(bytes, self.require_slot(name)?)
    }

    /// Encode a record, rejecting IBM overflow
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        self.encode_with(record, OverflowPolicy::Reject)
    }

    /// Encode a record
    ///
    /// Gaps are zero-filled and fields absent from the record take their
    /// declared default. Record entries with no matching field are ignored.
    pub fn encode_with(&self, record: &Record, overflow: OverflowPolicy) -> Result<Vec<u8>> {
        let endian = Endian::from(self.order);
        let mut cursor = Cursor::new(Vec::with_capacity(self.width));
        for segment in &self.segments {
            match segment {
                Segment::Gap(len) => cursor.write_all(&vec![0u8; *len])?,
                Segment::Field(field) => {
                    let value = record.get(field.name).unwrap_or(field.default);
                    write_one(&mut cursor, field.field_type, value, endian, overflow)?;
                }
            }
        }
        Ok(cursor.into_inner())
    }
}

//! Declarative header field schemas

use crate::datatypes::{LogicalType, Value};

/// One named field of a fixed-width binary header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Field name, unique within its schema
    pub name: &'static str,
    /// Byte offset from the start of the header
    pub offset: usize,
    /// Physical encoding of the field
    pub field_type: LogicalType,
    /// Value written when a record omits the field
    pub default: Value,
}

impl FieldSpec {
    /// Create a field defaulting to zero
    pub const fn new(name: &'static str, offset: usize, field_type: LogicalType) -> Self {
        Self {
            name,
            offset,
            field_type,
            default: Value::Int(0),
        }
    }

    /// Replace the default value
    pub const fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    /// Byte offset one past the end of the field
    pub const fn end(&self) -> usize {
        self.offset + self.field_type.width()
    }
}

/// A field table together with the width it must tile exactly
///
/// Schemas borrow their field table; the standard tables live in
/// [`crate::header::definitions`] but any table may be supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderSchema<'a> {
    /// Schema name, part of the layout cache key
    pub name: &'static str,
    /// Declared total header width in bytes
    pub width: usize,
    /// Field table in any order
    pub fields: &'a [FieldSpec],
}

impl<'a> HeaderSchema<'a> {
    /// Create a schema
    pub const fn new(name: &'static str, width: usize, fields: &'a [FieldSpec]) -> Self {
        Self {
            name,
            width,
            fields,
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec() {
        let field = FieldSpec::new("ns", 114, LogicalType::UInt16).with_default(Value::Int(1000));
        assert_eq!(field.end(), 116);
        assert_eq!(field.default, Value::Int(1000));
    }

    #[test]
    fn test_schema_lookup() {
        const FIELDS: [FieldSpec; 2] = [
            FieldSpec::new("a", 0, LogicalType::Int32),
            FieldSpec::new("b", 4, LogicalType::Int16),
        ];
        let schema = HeaderSchema::new("test", 6, &FIELDS);
        assert_eq!(schema.field("b").map(|f| f.offset), Some(4));
        assert!(schema.field("c").is_none());
    }
}

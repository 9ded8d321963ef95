//! Logical field and sample types and their physical properties
//!
//! Every numeric quantity in a SEG-Y file, whether a header field or a trace
//! sample, has one of a small closed set of physical encodings. This module is
//! the registry mapping each to its width, numeric limits and classification.

use crate::error::{Result, SegyError};
use crate::ibm_float::MAX_IBM_FLOAT;
use crate::revision::Revision;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical encoding of a header field or trace sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    /// 4-byte IBM System/360 hexadecimal float (always big-endian)
    IbmFloat32,
    /// 1-byte two's complement integer
    Int8,
    /// 1-byte unsigned integer
    UInt8,
    /// 2-byte two's complement integer
    Int16,
    /// 2-byte unsigned integer
    UInt16,
    /// 4-byte two's complement integer
    Int32,
    /// 4-byte unsigned integer
    UInt32,
    /// 4-byte IEEE-754 single precision float
    IeeeFloat32,
}

/// Numeric limits of a logical type, inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Smallest representable value
    pub min: f64,
    /// Largest representable value
    pub max: f64,
}

impl Limits {
    /// Whether `value` lies within the limits
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl LogicalType {
    /// All supported types
    pub const ALL: [Self; 8] = [
        Self::IbmFloat32,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::IeeeFloat32,
    ];

    /// Width of one value in bytes
    pub const fn width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::IbmFloat32 | Self::Int32 | Self::UInt32 | Self::IeeeFloat32 => 4,
        }
    }

    /// Inclusive numeric range of the type
    pub fn limits(self) -> Limits {
        let (min, max) = match self {
            Self::IbmFloat32 => (-MAX_IBM_FLOAT, MAX_IBM_FLOAT),
            Self::Int8 => (f64::from(i8::MIN), f64::from(i8::MAX)),
            Self::UInt8 => (0.0, f64::from(u8::MAX)),
            Self::Int16 => (f64::from(i16::MIN), f64::from(i16::MAX)),
            Self::UInt16 => (0.0, f64::from(u16::MAX)),
            Self::Int32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
            Self::UInt32 => (0.0, f64::from(u32::MAX)),
            Self::IeeeFloat32 => (f64::from(f32::MIN), f64::from(f32::MAX)),
        };
        Limits { min, max }
    }

    /// Whether values of this type are floating point
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::IbmFloat32 | Self::IeeeFloat32)
    }

    /// Whether values of this type can be negative
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::UInt8 | Self::UInt16 | Self::UInt32)
    }

    /// Canonical tag for this type
    pub const fn name(self) -> &'static str {
        match self {
            Self::IbmFloat32 => "ibm",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::IeeeFloat32 => "float32",
        }
    }

    /// Parse a type tag, accepting the legacy `nn` (non-negative) spellings
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "ibm" | "ibm32" => Ok(Self::IbmFloat32),
            "int8" => Ok(Self::Int8),
            "uint8" | "nnint8" => Ok(Self::UInt8),
            "int16" => Ok(Self::Int16),
            "uint16" | "nnint16" => Ok(Self::UInt16),
            "int32" => Ok(Self::Int32),
            "uint32" | "nnint32" => Ok(Self::UInt32),
            "float32" | "ieee32" => Ok(Self::IeeeFloat32),
            other => Err(SegyError::UnknownType(other.to_string())),
        }
    }

    /// Map a binary reel header data sample format code to a sample type
    ///
    /// Format 5 (IEEE float) was introduced by revision 1. Format 4 (fixed
    /// point with gain) is obsolete and not supported.
    pub fn from_sample_format(code: i64, revision: Revision) -> Result<Self> {
        match (code, revision) {
            (1, _) => Ok(Self::IbmFloat32),
            (2, _) => Ok(Self::Int32),
            (3, _) => Ok(Self::Int16),
            (5, Revision::Rev1) => Ok(Self::IeeeFloat32),
            (8, _) => Ok(Self::Int8),
            _ => Err(SegyError::UnknownSampleFormat {
                code,
                revision: revision.number(),
            }),
        }
    }

    /// The data sample format code for this type, if it can be a sample type
    pub const fn sample_format_code(self) -> Option<i16> {
        match self {
            Self::IbmFloat32 => Some(1),
            Self::Int32 => Some(2),
            Self::Int16 => Some(3),
            Self::IeeeFloat32 => Some(5),
            Self::Int8 => Some(8),
            Self::UInt8 | Self::UInt16 | Self::UInt32 => None,
        }
    }
}

impl FromStr for LogicalType {
    type Err = SegyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width of `ty` in bytes
pub const fn width_of(ty: LogicalType) -> usize {
    ty.width()
}

/// Inclusive `(min, max)` range of `ty`
pub fn limits_of(ty: LogicalType) -> (f64, f64) {
    let limits = ty.limits();
    (limits.min, limits.max)
}

/// Whether `ty` is a floating point type
pub const fn is_floating(ty: LogicalType) -> bool {
    ty.is_floating()
}

/// Whether `ty` can hold negative values
pub const fn is_signed(ty: LogicalType) -> bool {
    ty.is_signed()
}

/// Byte order of multi-byte values
///
/// SEG-Y mandates big-endian; little-endian files exist in the wild and are
/// supported for everything except IBM floats, which are big-endian by
/// definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first (the standard)
    #[default]
    Big,
    /// Least significant byte first
    Little,
}

impl From<ByteOrder> for binrw::Endian {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Big => Self::Big,
            ByteOrder::Little => Self::Little,
        }
    }
}

/// A numeric header field or sample value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
}

impl Value {
    /// The value as an integer, if it is integral
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Some(v as i64),
            Self::Float(_) => None,
        }
    }

    /// The value as a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// The value narrowed to single precision
    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(width_of(LogicalType::Int8), 1);
        assert_eq!(width_of(LogicalType::UInt16), 2);
        assert_eq!(width_of(LogicalType::IbmFloat32), 4);
        assert_eq!(width_of(LogicalType::IeeeFloat32), 4);
        assert_eq!(width_of(LogicalType::UInt32), 4);
    }

    #[test]
    fn test_limits() {
        assert_eq!(limits_of(LogicalType::Int16), (-32768.0, 32767.0));
        assert_eq!(limits_of(LogicalType::UInt8), (0.0, 255.0));
        assert_eq!(limits_of(LogicalType::UInt32), (0.0, 4_294_967_295.0));
        let (min, max) = limits_of(LogicalType::IbmFloat32);
        assert_eq!(min, -max);
        assert!(max > 7.0e75);
    }

    #[test]
    fn test_classification() {
        assert!(is_floating(LogicalType::IbmFloat32));
        assert!(is_floating(LogicalType::IeeeFloat32));
        assert!(!is_floating(LogicalType::Int32));
        assert!(LogicalType::Int8.is_signed());
        assert!(!LogicalType::UInt16.is_signed());
    }

    #[test]
    fn test_tags() {
        for ty in LogicalType::ALL {
            assert_eq!(LogicalType::from_tag(ty.name()).expect("canonical tag"), ty);
        }
        assert_eq!(
            "nnint16".parse::<LogicalType>().expect("legacy tag"),
            LogicalType::UInt16
        );
        assert!(matches!(
            LogicalType::from_tag("int64"),
            Err(SegyError::UnknownType(tag)) if tag == "int64"
        ));
    }

    #[test]
    fn test_sample_formats() {
        assert_eq!(
            LogicalType::from_sample_format(1, Revision::Rev0).expect("ibm"),
            LogicalType::IbmFloat32
        );
        assert_eq!(
            LogicalType::from_sample_format(5, Revision::Rev1).expect("ieee"),
            LogicalType::IeeeFloat32
        );
        assert!(LogicalType::from_sample_format(5, Revision::Rev0).is_err());
        assert!(LogicalType::from_sample_format(4, Revision::Rev1).is_err());

        for ty in LogicalType::ALL {
            if let Some(code) = ty.sample_format_code() {
                let back = LogicalType::from_sample_format(i64::from(code), Revision::Rev1)
                    .expect("code round trip");
                assert_eq!(back, ty);
            }
        }
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Int(42).as_f64(), 42.0);
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float(3.5).as_i64(), None);
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
        assert_eq!(Value::from(-7i32), Value::Int(-7));
    }
}

//! Packing and unpacking of homogeneous typed value sequences
//!
//! Integer and IEEE types go through binrw in the requested byte order. IBM
//! floats are always four big-endian bytes per value and go through
//! [`crate::ibm_float`].

use crate::datatypes::{ByteOrder, LogicalType, Value};
use crate::error::{Result, SegyError};
use crate::ibm_float::{OverflowPolicy, f64_to_ibm, ibm_to_ieee};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite, Endian};
use std::io::{Read, Seek, SeekFrom, Write};

/// Unpack exactly `count` values of type `ty` from `buf`
///
/// The buffer must hold exactly `count * width_of(ty)` bytes.
pub fn read_values(ty: LogicalType, count: usize, buf: &[u8], order: ByteOrder) -> Result<Vec<Value>> {
    let expected = byte_length(ty, count)?;
    if buf.len() != expected {
        return Err(SegyError::UnexpectedEndOfData {
            context: "binary values",
            expected,
            actual: buf.len(),
        });
    }

    if ty == LogicalType::IbmFloat32 {
        return Ok(buf
            .chunks_exact(4)
            .map(|chunk| Value::from(ibm_to_ieee([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect());
    }

    let endian = Endian::from(order);
    let mut cursor = Cursor::new(buf);
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_one(&mut cursor, ty, endian)?);
    }
    Ok(values)
}

pub(crate) fn read_one<R: Read + Seek>(reader: &mut R, ty: LogicalType, endian: Endian) -> Result<Value> {
    let value = match ty {
        LogicalType::Int8 => Value::Int(i64::from(i8::read_options(reader, endian, ())?)),
        LogicalType::UInt8 => Value::Int(i64::from(u8::read_options(reader, endian, ())?)),
        LogicalType::Int16 => Value::Int(i64::from(i16::read_options(reader, endian, ())?)),
        LogicalType::UInt16 => Value::Int(i64::from(u16::read_options(reader, endian, ())?)),
        LogicalType::Int32 => Value::Int(i64::from(i32::read_options(reader, endian, ())?)),
        LogicalType::UInt32 => Value::Int(i64::from(u32::read_options(reader, endian, ())?)),
        LogicalType::IeeeFloat32 => Value::from(f32::read_options(reader, endian, ())?),
        LogicalType::IbmFloat32 => {
            let mut bytes = [0u8; 4];
            reader.read_exact(&mut bytes)?;
            Value::from(ibm_to_ieee(bytes))
        }
    };
    Ok(value)
}

/// Pack `values` as type `ty`, rejecting IBM overflow
pub fn write_values(ty: LogicalType, values: &[Value], order: ByteOrder) -> Result<Vec<u8>> {
    write_values_with(ty, values, order, OverflowPolicy::Reject)
}

/// Pack `values` as type `ty` with an explicit IBM overflow policy
///
/// Integer types require integral values inside the type's limits. IEEE
/// floats accept any value whose finite magnitude fits `f32`.
pub fn write_values_with(
    ty: LogicalType,
    values: &[Value],
    order: ByteOrder,
    overflow: OverflowPolicy,
) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(values.len() * ty.width()));
    let endian = Endian::from(order);
    for value in values {
        write_one(&mut cursor, ty, *value, endian, overflow)?;
    }
    Ok(cursor.into_inner())
}

pub(crate) fn write_one<W: Write + Seek>(
    writer: &mut W,
    ty: LogicalType,
    value: Value,
    endian: Endian,
    overflow: OverflowPolicy,
) -> Result<()> {
    match ty {
        LogicalType::IbmFloat32 => {
            writer.write_all(&f64_to_ibm(value.as_f64(), overflow)?)?;
        }
        LogicalType::IeeeFloat32 => {
            let v = value.as_f64();
            if v.is_finite() && !ty.limits().contains(v) {
                return Err(out_of_range(ty, v));
            }
            (v as f32).write_options(writer, endian, ())?;
        }
        LogicalType::Int8 => (checked_int(ty, value)? as i8).write_options(writer, endian, ())?,
        LogicalType::UInt8 => (checked_int(ty, value)? as u8).write_options(writer, endian, ())?,
        LogicalType::Int16 => (checked_int(ty, value)? as i16).write_options(writer, endian, ())?,
        LogicalType::UInt16 => (checked_int(ty, value)? as u16).write_options(writer, endian, ())?,
        LogicalType::Int32 => (checked_int(ty, value)? as i32).write_options(writer, endian, ())?,
        LogicalType::UInt32 => (checked_int(ty, value)? as u32).write_options(writer, endian, ())?,
    }
    Ok(())
}

/// Bytes occupied by `count` values of type `ty`
fn byte_length(ty: LogicalType, count: usize) -> Result<usize> {
    count
        .checked_mul(ty.width())
        .ok_or(SegyError::ValueOutOfRange {
            value: count as f64,
            type_name: "value count",
            min: 0.0,
            max: (usize::MAX / ty.width()) as f64,
        })
}

/// Integral value inside the limits of `ty`, or a range error
fn checked_int(ty: LogicalType, value: Value) -> Result<i64> {
    match value.as_i64() {
        Some(v) if ty.limits().contains(v as f64) => Ok(v),
        _ => Err(out_of_range(ty, value.as_f64())),
    }
}

fn out_of_range(ty: LogicalType, value: f64) -> SegyError {
    let limits = ty.limits();
    SegyError::ValueOutOfRange {
        value,
        type_name: ty.name(),
        min: limits.min,
        max: limits.max,
    }
}

/// Seek to `pos` and unpack `count` values of type `ty`
pub fn read_values_at<R: Read + Seek>(
    reader: &mut R,
    pos: u64,
    ty: LogicalType,
    count: usize,
    order: ByteOrder,
) -> Result<Vec<Value>> {
    reader.seek(SeekFrom::Start(pos))?;
    let buf = read_up_to(reader, byte_length(ty, count)?)?;
    read_values(ty, count, &buf, order)
}

/// Seek to `pos` and write `values` packed as type `ty`
pub fn write_values_at<W: Write + Seek>(
    writer: &mut W,
    pos: u64,
    ty: LogicalType,
    values: &[Value],
    order: ByteOrder,
    overflow: OverflowPolicy,
) -> Result<()> {
    let buf = write_values_with(ty, values, order, overflow)?;
    writer.seek(SeekFrom::Start(pos))?;
    writer.write_all(&buf)?;
    Ok(())
}

/// Read up to `len` bytes, stopping early only at end of file
pub(crate) fn read_up_to<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    reader.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

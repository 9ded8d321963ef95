//! IBM System/360 hexadecimal floating point
//!
//! An IBM single is stored big-endian as one sign bit, a 7-bit base-16
//! exponent biased by 64 and a 24-bit fraction with an implied radix point on
//! the left:
//!
//! ```text
//! value = (-1)^sign * (fraction / 2^24) * 16^(exponent - 64)
//! ```
//!
//! Normalized values keep the leading hex digit of the fraction non-zero, so
//! the fraction lies in `[1/16, 1)` and up to three leading bits are always
//! zero. Compared with IEEE single this trades precision for range: encoding
//! a general `f32` loses up to three bits, and the representable range is far
//! wider than `f32` in both directions.
//!
//! # Example
//!
//! ```
//! use segy_formats::ibm_float::{ibm_to_ieee, ieee_to_ibm};
//!
//! let bytes = ieee_to_ibm(-118.625).expect("in range");
//! assert_eq!(bytes, [0xC2, 0x76, 0xA0, 0x00]);
//! assert_eq!(ibm_to_ieee(bytes), -118.625);
//! ```

use crate::error::{Result, SegyError};
use serde::{Deserialize, Serialize};

/// Largest finite IBM single: `(1 - 16^-6) * 16^63`
pub const MAX_IBM_FLOAT: f64 = 7.237_005_145_973_115_5e75;

/// Most negative finite IBM single
pub const MIN_IBM_FLOAT: f64 = -MAX_IBM_FLOAT;

/// Smallest positive normalized IBM single: `16^-65`
pub const SMALLEST_POSITIVE_NORMAL_IBM_FLOAT: f64 = 5.397_605_346_934_028e-79;

const EXPONENT_BIAS: i32 = 64;
const FRACTION_BITS: i32 = 24;
const FRACTION_MASK: u32 = 0x00FF_FFFF;
const SIGN_BIT: u32 = 0x8000_0000;

/// Behaviour when a value exceeds the IBM range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with [`SegyError::Overflow`]
    #[default]
    Reject,
    /// Saturate to the signed representable extremum
    Clamp,
}

/// `2^exp` for exponents inside the normal `f64` range
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((1023 + exp) as u64) << 52)
}

/// Decode a big-endian IBM single to an `f64`
///
/// Every IBM single is exactly representable as an `f64`.
pub fn ibm_to_f64(bytes: [u8; 4]) -> f64 {
    let bits = u32::from_be_bytes(bytes);
    let fraction = bits & FRACTION_MASK;
    if fraction == 0 {
        return 0.0;
    }

    let exponent = ((bits >> 24) & 0x7F) as i32 - EXPONENT_BIAS;
    let magnitude = f64::from(fraction) * pow2(4 * exponent - FRACTION_BITS);
    if bits & SIGN_BIT == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Decode a big-endian IBM single to a native `f32`
///
/// A zero fraction decodes to `+0.0` whatever the sign and exponent bits say.
/// Magnitudes beyond the `f32` range become infinite, and very small ones
/// round to subnormals or zero.
pub fn ibm_to_ieee(bytes: [u8; 4]) -> f32 {
    ibm_to_f64(bytes) as f32
}

/// Encode an `f64` as a big-endian IBM single
pub fn f64_to_ibm(value: f64, policy: OverflowPolicy) -> Result<[u8; 4]> {
    if value == 0.0 {
        return Ok([0; 4]);
    }
    if value.is_nan() {
        return Err(SegyError::Overflow(value));
    }

    let sign = if value.is_sign_negative() { SIGN_BIT } else { 0 };
    let mut magnitude = value.abs();

    if magnitude > MAX_IBM_FLOAT {
        return match policy {
            OverflowPolicy::Reject => Err(SegyError::Overflow(value)),
            OverflowPolicy::Clamp => Ok((sign | 0x7FFF_FFFF).to_be_bytes()),
        };
    }
    if magnitude < SMALLEST_POSITIVE_NORMAL_IBM_FLOAT {
        return Ok([0; 4]);
    }

    // Normalize into [1/16, 1); scaling by 16 is exact in binary
    let mut exponent = 0i32;
    while magnitude >= 1.0 {
        magnitude /= 16.0;
        exponent += 1;
    }
    while magnitude < 1.0 / 16.0 {
        magnitude *= 16.0;
        exponent -= 1;
    }

    let mut fraction = (magnitude * pow2(FRACTION_BITS)).round() as u32;
    if fraction > FRACTION_MASK {
        // Rounding carried into a new hex digit
        fraction >>= 4;
        exponent += 1;
    }

    let biased = exponent + EXPONENT_BIAS;
    if biased > 0x7F {
        return match policy {
            OverflowPolicy::Reject => Err(SegyError::Overflow(value)),
            OverflowPolicy::Clamp => Ok((sign | 0x7FFF_FFFF).to_be_bytes()),
        };
    }

    Ok((sign | ((biased as u32) << 24) | fraction).to_be_bytes())
}

/// Encode a native `f32` as a big-endian IBM single, rejecting overflow
///
/// Only non-finite inputs can fail: every finite `f32` lies inside the IBM
/// range.
pub fn ieee_to_ibm(value: f32) -> Result<[u8; 4]> {
    f64_to_ibm(f64::from(value), OverflowPolicy::Reject)
}

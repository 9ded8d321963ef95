//! SEG-Y revision handling
//!
//! The binary reel header stores the format revision as a 16-bit code whose
//! encoding varies between writers: revision 1 appears as `1`, `100` or the
//! standard `0x0100`.

use crate::datatypes::LogicalType;
use crate::error::{Result, SegyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical SEG-Y revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revision {
    /// The 1975 standard
    Rev0,
    /// The 2002 revision
    Rev1,
}

impl Revision {
    /// Raw code written to the binary reel header for this revision
    pub const fn raw_code(self) -> u16 {
        match self {
            Self::Rev0 => 0x0000,
            Self::Rev1 => 0x0100,
        }
    }

    /// Major revision number
    pub const fn number(self) -> u8 {
        match self {
            Self::Rev0 => 0,
            Self::Rev1 => 1,
        }
    }

    /// Canonicalize a raw revision code
    pub fn canonicalize(raw: i64) -> Result<Self> {
        match raw {
            0 => Ok(Self::Rev0),
            1 | 100 | 0x0100 => Ok(Self::Rev1),
            other => Err(SegyError::UnknownRevision(other)),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SEG-Y rev {}", self.number())
    }
}

/// Bytes per sample for a data sample format code under `revision`
pub fn bytes_per_sample(sample_format: i64, revision: Revision) -> Result<usize> {
    LogicalType::from_sample_format(sample_format, revision).map(LogicalType::width)
}

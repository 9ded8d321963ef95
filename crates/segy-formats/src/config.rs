//! Reader and writer configuration
//!
//! SEG-Y files in the wild deviate from the standard in a few predictable
//! ways: little-endian headers, ASCII instead of EBCDIC text, sample format
//! codes that do not match the data. [`SegyConfig`] collects the overrides a
//! caller needs for such files and can be loaded from JSON.

use crate::datatypes::ByteOrder;
use crate::error::{Result, SegyError};
use crate::ibm_float::OverflowPolicy;
use crate::text::encoding::{EncodingGuesser, EncodingSource, TextEncoding};
use serde::{Deserialize, Serialize};

/// Settings shared by the SEG-Y reading and writing functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegyConfig {
    /// Byte order of binary headers and non-IBM samples
    pub byte_order: ByteOrder,
    /// Textual header encoding, `None` to guess per page
    pub encoding: Option<TextEncoding>,
    /// Handling of values outside the IBM float range when writing
    pub overflow: OverflowPolicy,
    /// Bytes per sample to use instead of the one implied by the sample format
    pub bytes_per_sample: Option<usize>,
}

impl SegyConfig {
    /// Create a configuration for standard big-endian files
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(SegyError::InvalidConfig)?;
        Ok(config)
    }

    /// Set the byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Fix the textual header encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the IBM overflow policy
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Override bytes per sample
    pub fn with_bytes_per_sample(mut self, bps: usize) -> Self {
        self.bytes_per_sample = Some(bps);
        self
    }

    /// Encoding source for textual pages, consulting `guesser` only when no
    /// encoding is fixed
    pub fn encoding_source<'a>(&self, guesser: &'a dyn EncodingGuesser) -> EncodingSource<'a> {
        self.encoding
            .map_or(EncodingSource::Guessed(guesser), EncodingSource::Known)
    }

    /// Bytes per sample, preferring the override to `from_reel`
    pub fn resolve_bytes_per_sample(&self, from_reel: usize) -> usize {
        self.bytes_per_sample.unwrap_or(from_reel)
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(bps) = self.bytes_per_sample
            && !matches!(bps, 1 | 2 | 4)
        {
            return Err(format!("bytes_per_sample must be 1, 2 or 4, not {bps}"));
        }

        Ok(())
    }
}

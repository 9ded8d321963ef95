//! Error types for SEG-Y decoding, encoding and cataloging

use thiserror::Error;

/// Errors that can occur when reading, writing or indexing SEG-Y data
#[derive(Error, Debug)]
pub enum SegyError {
    /// Field table does not exactly tile its declared header width
    #[error("Schema {schema} does not tile {width} bytes: {reason}")]
    SchemaLayout {
        /// Name of the offending schema
        schema: String,
        /// Declared header width in bytes
        width: usize,
        /// What went wrong while laying out the fields
        reason: String,
    },

    /// Logical type tag outside the supported set
    #[error("Unknown SEG-Y data type: {0:?}")]
    UnknownType(String),

    /// Data sample format code with no logical type for the revision
    #[error("Unknown data sample format code {code} for revision {revision}")]
    UnknownSampleFormat {
        /// Raw sample format code from the binary reel header
        code: i64,
        /// Canonical revision the code was interpreted against
        revision: u8,
    },

    /// Raw revision code that does not canonicalize
    #[error("Unknown SEG-Y revision code: {0}")]
    UnknownRevision(i64),

    /// A read returned fewer bytes than the structure requires
    #[error("Unexpected end of data reading {context}: expected {expected} bytes, got {actual}")]
    UnexpectedEndOfData {
        /// What was being read
        context: &'static str,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Requested or guessed text encoding is not supported
    #[error("Unsupported text encoding for {context}: {encoding:?}")]
    UnsupportedEncoding {
        /// What was being decoded or encoded
        context: &'static str,
        /// The encoding name that was rejected
        encoding: String,
    },

    /// Value cannot be represented as an IBM hexadecimal float
    #[error("Value {0} is outside the representable IBM float range")]
    Overflow(f64),

    /// Value does not fit the field or sample type it is written as
    #[error("Value {value} is outside the range of {type_name} ({min} to {max})")]
    ValueOutOfRange {
        /// Offending value
        value: f64,
        /// Name of the logical type
        type_name: &'static str,
        /// Lower limit of the type
        min: f64,
        /// Upper limit of the type
        max: f64,
    },

    /// A field required by an operation is absent from the schema or record
    #[error("Field {0:?} is not present")]
    MissingField(String),

    /// Textual header pages or lines have the wrong shape
    #[error("Invalid textual header: {0}")]
    InvalidTextualHeader(String),

    /// Trace scan stopped at the request of the progress sink
    #[error("Trace scan cancelled after {traces_scanned} traces")]
    ScanCancelled {
        /// Number of traces cataloged before cancellation
        traces_scanned: usize,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

impl SegyError {
    /// Whether this error reports a short read
    pub fn is_end_of_data(&self) -> bool {
        match self {
            Self::UnexpectedEndOfData { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            Self::BinRw(e) => e.is_eof(),
            _ => false,
        }
    }
}

/// Type alias for SEG-Y operation results
pub type Result<T> = std::result::Result<T, SegyError>;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_data_classification() {
        let short = SegyError::UnexpectedEndOfData {
            context: "trace header",
            expected: 240,
            actual: 12,
        };
        assert!(short.is_end_of_data());

        let io = SegyError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        assert!(io.is_end_of_data());

        assert!(!SegyError::UnknownRevision(7).is_end_of_data());
    }

    #[test]
    fn test_error_messages() {
        let err = SegyError::UnexpectedEndOfData {
            context: "extended textual header",
            expected: 3200,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected end of data reading extended textual header: expected 3200 bytes, got 0"
        );
    }
}

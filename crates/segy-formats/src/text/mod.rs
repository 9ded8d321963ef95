//! Textual headers
//!
//! The file begins with a 3200-byte textual reel header and may carry further
//! 3200-byte extended textual headers after the binary reel header. Both are
//! card images in ASCII or EBCDIC.

pub mod encoding;
pub mod extended;
pub mod textual;

pub use encoding::{EncodingGuesser, EncodingSource, TextEncoding};
pub use extended::{
    CountMismatch, END_TEXT_STANZA, ExtendedHeaderMode, ExtendedHeaders,
    format_extended_textual_header, read_extended_textual_headers,
    write_extended_textual_headers,
};
pub use textual::{
    CARD_LENGTH, CARDS_PER_PAGE, TEXTUAL_HEADER_LEN, TextualPage, read_textual_reel_header,
    write_textual_reel_header,
};

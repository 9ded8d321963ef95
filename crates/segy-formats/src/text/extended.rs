//! Extended textual headers
//!
//! Zero or more 3200-byte pages may follow the binary reel header. The
//! binary reel header declares how many: a non-negative count, or `-1`
//! meaning "until a page carrying the end stanza". In counted mode the end
//! stanza page, if present, is the last of the declared pages.

use crate::error::Result;
use crate::reel::REEL_HEADER_LEN;
use crate::text::encoding::{EncodingSource, TextEncoding};
use crate::text::textual::{
    CARD_LENGTH, CARDS_PER_PAGE, TextualPage, encode_page, read_page,
};
use std::io::{Read, Seek, SeekFrom, Write};
use tracing::{debug, warn};

/// Stanza whose presence in the first line of a page ends the extended headers
pub const END_TEXT_STANZA: &str = "((SEG: EndText))";

/// Line terminator of formatted extended header lines
pub const HEADER_NEWLINE: &str = "\r\n";

/// How the number of extended pages is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedHeaderMode {
    /// Exactly this many pages were declared
    Counted(usize),
    /// Pages continue until the end stanza
    Unbounded,
}

impl ExtendedHeaderMode {
    /// Interpret the declared count from the binary reel header
    pub fn from_declared(declared: i64) -> Self {
        usize::try_from(declared).map_or(Self::Unbounded, Self::Counted)
    }
}

/// Declared and actual page counts when the end stanza arrives early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    /// Pages declared in the binary reel header
    pub declared: usize,
    /// Pages read before the end stanza
    pub found: usize,
}

/// Result of reading the extended textual headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedHeaders {
    /// Pages read, excluding any end stanza page
    pub pages: Vec<TextualPage>,
    /// Mode derived from the declared count
    pub mode: ExtendedHeaderMode,
    /// Set when a counted read met the end stanza before the last page
    pub mismatch: Option<CountMismatch>,
}

impl ExtendedHeaders {
    /// Number of pages read
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages were read
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Join all pages into one string, one card per line
    pub fn concatenate(&self) -> String {
        self.pages
            .iter()
            .flatten()
            .map(|line| line.trim_end_matches(['\r', '\n', ' ']))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether a page is the end stanza page
pub fn has_end_text_stanza(page: &[String]) -> bool {
    page.first()
        .is_some_and(|line| line.contains(END_TEXT_STANZA))
}

/// Read the extended textual headers
///
/// Seeks to byte 3600 first. On success the reader is positioned at the
/// first trace header.
pub fn read_extended_textual_headers<R: Read + Seek>(
    reader: &mut R,
    declared: i64,
    source: &EncodingSource<'_>,
) -> Result<ExtendedHeaders> {
    reader.seek(SeekFrom::Start(REEL_HEADER_LEN as u64))?;
    let mode = ExtendedHeaderMode::from_declared(declared);
    debug!("Reading extended textual headers, mode {:?}", mode);

    match mode {
        ExtendedHeaderMode::Counted(expected) => read_counted(reader, expected, source),
        ExtendedHeaderMode::Unbounded => read_until_end(reader, source),
    }
}

fn read_counted<R: Read>(
    reader: &mut R,
    expected: usize,
    source: &EncodingSource<'_>,
) -> Result<ExtendedHeaders> {
    let mut pages = Vec::with_capacity(expected);
    let mut mismatch = None;

    for index in 0..expected {
        let page = read_page(reader, source, "extended textual header")?;
        if has_end_text_stanza(&page) {
            if index + 1 != expected {
                warn!(
                    "End text stanza in extended header {} of {} declared",
                    index + 1,
                    expected
                );
                mismatch = Some(CountMismatch {
                    declared: expected,
                    found: index,
                });
            }
            break;
        }
        pages.push(page);
    }

    Ok(ExtendedHeaders {
        pages,
        mode: ExtendedHeaderMode::Counted(expected),
        mismatch,
    })
}

fn read_until_end<R: Read>(reader: &mut R, source: &EncodingSource<'_>) -> Result<ExtendedHeaders> {
    let mut pages = Vec::new();
    loop {
        let page = read_page(reader, source, "extended textual header")?;
        if has_end_text_stanza(&page) {
            break;
        }
        pages.push(page);
    }
    debug!("Found {} extended textual headers before end stanza", pages.len());

    Ok(ExtendedHeaders {
        pages,
        mode: ExtendedHeaderMode::Unbounded,
        mismatch: None,
    })
}

/// Write extended textual header pages starting at byte 3600
///
/// Every page must have 40 lines and every line must encode to exactly 80
/// bytes. All pages are validated before anything is written.
pub fn write_extended_textual_headers<W: Write + Seek>(
    writer: &mut W,
    pages: &[TextualPage],
    encoding: TextEncoding,
) -> Result<()> {
    let encoded = pages
        .iter()
        .map(|page| encode_page(page, encoding))
        .collect::<Result<Vec<_>>>()?;

    writer.seek(SeekFrom::Start(REEL_HEADER_LEN as u64))?;
    for raw in &encoded {
        writer.write_all(raw)?;
    }
    Ok(())
}

/// Format free text into extended textual header pages
///
/// Each source line is split into chunks of 78 characters, padded with
/// spaces and terminated with CRLF. Empty source lines become blank cards.
/// The last page is padded with blank cards, and an end stanza page is
/// appended when `include_end_text` is set.
pub fn format_extended_textual_header(
    text: &str,
    encoding: TextEncoding,
    include_end_text: bool,
) -> Result<Vec<TextualPage>> {
    let width = CARD_LENGTH - HEADER_NEWLINE.len();

    let mut cards = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            cards.push(terminate_card("", width));
            continue;
        }
        for chunk in chars.chunks(width) {
            cards.push(terminate_card(&chunk.iter().collect::<String>(), width));
        }
    }

    let mut pages: Vec<TextualPage> = cards
        .chunks(CARDS_PER_PAGE)
        .map(|chunk| {
            let mut page = chunk.to_vec();
            page.resize(CARDS_PER_PAGE, terminate_card("", width));
            page
        })
        .collect();

    if include_end_text {
        let mut stop = vec![terminate_card(END_TEXT_STANZA, width)];
        stop.resize(CARDS_PER_PAGE, terminate_card("", width));
        pages.push(stop);
    }

    // Reject characters the encoding cannot carry now rather than at write time
    for page in &pages {
        encode_page(page, encoding)?;
    }
    Ok(pages)
}

fn terminate_card(line: &str, width: usize) -> String {
    format!("{line:<width$}{HEADER_NEWLINE}")
}

//! 3200-byte card image pages
//!
//! The textual reel header and every extended textual header share one
//! shape: forty 80-character "cards".

use crate::error::{Result, SegyError};
use crate::text::encoding::{EncodingSource, TextEncoding};
use crate::values::read_up_to;
use std::io::{Read, Seek, SeekFrom, Write};

/// Characters per card
pub const CARD_LENGTH: usize = 80;

/// Cards per page
pub const CARDS_PER_PAGE: usize = 40;

/// Bytes per textual page
pub const TEXTUAL_HEADER_LEN: usize = CARD_LENGTH * CARDS_PER_PAGE;

/// Forty decoded cards of eighty characters each
pub type TextualPage = Vec<String>;

/// Read one page at the current position
pub(crate) fn read_page<R: Read>(
    reader: &mut R,
    source: &EncodingSource<'_>,
    context: &'static str,
) -> Result<TextualPage> {
    let raw = read_up_to(reader, TEXTUAL_HEADER_LEN)?;
    if raw.len() < TEXTUAL_HEADER_LEN {
        return Err(SegyError::UnexpectedEndOfData {
            context,
            expected: TEXTUAL_HEADER_LEN,
            actual: raw.len(),
        });
    }
    decode_page(&raw, source.resolve(&raw, context)?)
}

/// Split a raw 3200-byte page into decoded cards
pub fn decode_page(raw: &[u8], encoding: TextEncoding) -> Result<TextualPage> {
    if raw.len() != TEXTUAL_HEADER_LEN {
        return Err(SegyError::InvalidTextualHeader(format!(
            "page is {} bytes, not {TEXTUAL_HEADER_LEN}",
            raw.len()
        )));
    }
    raw.chunks_exact(CARD_LENGTH)
        .map(|card| encoding.decode(card))
        .collect()
}

/// Encode a page whose cards must each encode to exactly 80 bytes
pub fn encode_page(page: &[String], encoding: TextEncoding) -> Result<Vec<u8>> {
    if page.len() != CARDS_PER_PAGE {
        return Err(SegyError::InvalidTextualHeader(format!(
            "page has {} lines, not {CARDS_PER_PAGE}",
            page.len()
        )));
    }

    let mut raw = Vec::with_capacity(TEXTUAL_HEADER_LEN);
    for (index, line) in page.iter().enumerate() {
        let encoded = encoding.encode(line)?;
        if encoded.len() != CARD_LENGTH {
            return Err(SegyError::InvalidTextualHeader(format!(
                "line {index} encodes to {} bytes, not {CARD_LENGTH}",
                encoded.len()
            )));
        }
        raw.extend_from_slice(&encoded);
    }
    Ok(raw)
}

/// Read the textual reel header at the start of the file
pub fn read_textual_reel_header<R: Read + Seek>(
    reader: &mut R,
    source: &EncodingSource<'_>,
) -> Result<TextualPage> {
    reader.seek(SeekFrom::Start(0))?;
    read_page(reader, source, "textual reel header")
}

/// Write the textual reel header at the start of the file
///
/// Lines are padded with spaces or truncated to 80 characters, missing lines
/// are blank and lines beyond the fortieth are dropped. Characters the
/// encoding cannot represent are an error.
pub fn write_textual_reel_header<W: Write + Seek, S: AsRef<str>>(
    writer: &mut W,
    lines: &[S],
    encoding: TextEncoding,
) -> Result<()> {
    let page: TextualPage = (0..CARDS_PER_PAGE)
        .map(|i| {
            let line = lines.get(i).map_or("", AsRef::as_ref);
            let mut card: String = line.chars().take(CARD_LENGTH).collect();
            let len = card.chars().count();
            card.extend(std::iter::repeat_n(' ', CARD_LENGTH - len));
            card
        })
        .collect();

    let raw = encode_page(&page, encoding)?;
    writer.seek(SeekFrom::Start(0))?;
    writer.write_all(&raw)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reel_header_round_trip() {
        let mut file = Cursor::new(Vec::new());
        let lines = ["C 1 CLIENT SIXTY NORTH", "C 2 LINE 42"];
        write_textual_reel_header(&mut file, &lines, TextEncoding::Ebcdic).expect("write");
        assert_eq!(file.get_ref().len(), TEXTUAL_HEADER_LEN);
        assert_eq!(file.get_ref()[0], 0xC3);

        let page = read_textual_reel_header(&mut file, &TextEncoding::Ebcdic.into())
            .expect("read");
        assert_eq!(page.len(), CARDS_PER_PAGE);
        assert!(page.iter().all(|l| l.chars().count() == CARD_LENGTH));
        assert_eq!(page[1].trim_end(), "C 2 LINE 42");
        assert_eq!(page[39], " ".repeat(CARD_LENGTH));
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut file = Cursor::new(Vec::new());
        let long = "X".repeat(100);
        write_textual_reel_header(&mut file, &[long], TextEncoding::Ascii).expect("write");
        let page = read_textual_reel_header(&mut file, &TextEncoding::Ascii.into())
            .expect("read");
        assert_eq!(page[0], "X".repeat(CARD_LENGTH));
    }

    #[test]
    fn test_short_file() {
        let mut file = Cursor::new(vec![b' '; 100]);
        assert!(matches!(
            read_textual_reel_header(&mut file, &TextEncoding::Ascii.into()),
            Err(SegyError::UnexpectedEndOfData { expected: 3200, actual: 100, .. })
        ));
    }

    #[test]
    fn test_encode_page_shape() {
        let short_line = vec!["x".to_string(); CARDS_PER_PAGE];
        assert!(matches!(
            encode_page(&short_line, TextEncoding::Ascii),
            Err(SegyError::InvalidTextualHeader(_))
        ));
        let too_few = vec![" ".repeat(CARD_LENGTH); 39];
        assert!(encode_page(&too_few, TextEncoding::Ascii).is_err());
    }
}

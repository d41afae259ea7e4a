//! Word document (.docx) decoding.
//!
//! A docx file is a zip container; the body text lives in `word/document.xml`
//! as `w:t` runs grouped into `w:p` paragraphs.

use quick_xml::events::Event;
use quick_xml::Reader;
use shared_types::{DecodedContent, DocumentDecoder, ExtractionError};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

pub struct WordDecoder;

impl WordDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentDecoder for WordDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["docx"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, ExtractionError> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::decode_failed("docx", e))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| ExtractionError::decode_failed("docx", format!("{DOCUMENT_XML}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::decode_failed("docx", e))?;

        document_text(&xml).map(DecodedContent::Text)
    }
}

fn document_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractionError::decode_failed("docx", e))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::decode_failed(
                    "docx",
                    format!("XML error at position {}: {e}", reader.buffer_position()),
                ))
            }
            _ => {}
        }
    }

    Ok(text)
}

//! PDF decoding, one text blob per page.

use lopdf::Document;
use shared_types::{DecodedContent, DocumentDecoder, ExtractionError};
use tracing::{debug, warn};

pub struct PdfDecoder;

impl PdfDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentDecoder for PdfDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["pdf"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, ExtractionError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::decode_failed("pdf", e))?;

        // get_pages is keyed by page number, so iteration is already in page order
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!("Extracting text from {} PDF pages", page_numbers.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            match doc.extract_text(&[page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => warn!("Skipping unreadable PDF page {}: {}", page_number, e),
            }
        }

        Ok(DecodedContent::Pages(pages))
    }
}

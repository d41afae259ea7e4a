//! Leaf format decoders: bytes in, text or cells out.

mod pdf;
mod spreadsheet;
mod text;
mod word;

pub use pdf::PdfDecoder;
pub use spreadsheet::SpreadsheetDecoder;
pub use text::TextDecoder;
pub use word::WordDecoder;

use shared_types::{DocumentDecoder, DocumentFormat};
use std::sync::Arc;

/// Decoder for one binary document format.
pub fn decoder_for(format: DocumentFormat) -> Arc<dyn DocumentDecoder> {
    match format {
        DocumentFormat::Xlsx | DocumentFormat::Xls | DocumentFormat::Ods => {
            Arc::new(SpreadsheetDecoder::new(format))
        }
        DocumentFormat::Docx => Arc::new(WordDecoder::new()),
        DocumentFormat::Pdf => Arc::new(PdfDecoder::new()),
    }
}

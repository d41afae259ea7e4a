//! Spreadsheet decoding (xlsx, xls, ods) using calamine.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use shared_types::{DecodedContent, DocumentDecoder, DocumentFormat, ExtractionError};
use std::io::Cursor;
use tracing::debug;

pub struct SpreadsheetDecoder {
    format: DocumentFormat,
}

impl SpreadsheetDecoder {
    pub fn new(format: DocumentFormat) -> Self {
        Self { format }
    }
}

impl DocumentDecoder for SpreadsheetDecoder {
    fn extensions(&self) -> &[&'static str] {
        match self.format {
            DocumentFormat::Xls => &["xls"],
            DocumentFormat::Ods => &["ods"],
            _ => &["xlsx"],
        }
    }

    /// Every worksheet in workbook order, rows appended to a single grid.
    /// Empty cells are dropped.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, ExtractionError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ExtractionError::decode_failed(self.format.extension(), e))?;

        let mut grid = Vec::new();
        for (sheet_name, range) in workbook.worksheets() {
            debug!(
                "Reading sheet {} ({} rows)",
                sheet_name,
                range.height()
            );
            for row in range.rows() {
                grid.push(row.iter().filter_map(cell_to_string).collect());
            }
        }

        Ok(DecodedContent::Grid(grid))
    }
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

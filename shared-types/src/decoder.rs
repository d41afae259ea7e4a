use crate::{ArchiveEntry, ExtractionError, NamedBlob};

/// Output of a format decoder, handed to the pattern matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedContent {
    Text(String),
    /// One text blob per page, in page order
    Pages(Vec<String>),
    /// Spreadsheet cells already rendered to strings, row-major
    Grid(Vec<Vec<String>>),
}

impl DecodedContent {
    pub fn is_empty(&self) -> bool {
        match self {
            DecodedContent::Text(text) => text.is_empty(),
            DecodedContent::Pages(pages) => pages.iter().all(String::is_empty),
            DecodedContent::Grid(rows) => rows.iter().all(Vec::is_empty),
        }
    }
}

/// Converts the bytes of one leaf format into text or cells.
///
/// Implementations are pure: same bytes, same output.
pub trait DocumentDecoder: Send + Sync {
    /// Extensions this decoder registers for in the dispatch table
    fn extensions(&self) -> &[&'static str];

    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, ExtractionError>;
}

/// Converts the bytes of a container into its entries.
pub trait ArchiveDecoder: Send + Sync {
    fn extensions(&self) -> &[&'static str];

    /// Unpack `blob`. A container that cannot be opened at all is an
    /// `ExtractionError::ArchiveCorrupt` naming the blob; a member that cannot
    /// be read becomes an `ArchiveEntry::Unreadable` next to its siblings.
    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError>;
}

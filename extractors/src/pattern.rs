use regex::Regex;
use shared_types::{DecodedContent, EmailSet};

/// The single address pattern applied to every text blob.
///
/// Word boundaries are ASCII only: an address directly next to CJK or
/// accented letters still matches.
pub const EMAIL_PATTERN: &str =
    r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)";

/// Finds email addresses in text and spreadsheet cells.
#[derive(Debug, Clone)]
pub struct EmailMatcher {
    regex: Regex,
}

impl EmailMatcher {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }

    /// Unique matches in order of first occurrence. Empty when nothing matches.
    pub fn match_text(&self, text: &str) -> EmailSet {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Match cell by cell, scanning each row left to right before the next.
    pub fn match_grid<R, C>(&self, rows: R) -> EmailSet
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut emails = EmailSet::new();
        for row in rows {
            for cell in row {
                emails.merge(self.match_text(cell.as_ref()));
            }
        }
        emails
    }

    pub fn match_content(&self, content: &DecodedContent) -> EmailSet {
        match content {
            DecodedContent::Text(text) => self.match_text(text),
            DecodedContent::Pages(pages) => {
                let mut emails = EmailSet::new();
                for page in pages {
                    emails.merge(self.match_text(page));
                }
                emails
            }
            DecodedContent::Grid(rows) => self.match_grid(rows),
        }
    }
}

impl Default for EmailMatcher {
    fn default() -> Self {
        Self::new()
    }
}

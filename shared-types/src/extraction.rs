use crate::EmailSet;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Extraction error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ExtractionError {
    #[error("Unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Corrupt archive {entry}: {cause}")]
    ArchiveCorrupt { entry: String, cause: String },

    #[error("Failed to decode {format}: {cause}")]
    DecodeFailed { format: String, cause: String },

    #[error("IO error: {cause}")]
    IoFailed { cause: String },
}

impl ExtractionError {
    pub fn unsupported(extension: impl Into<String>) -> Self {
        ExtractionError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn archive_corrupt(entry: impl Into<String>, cause: impl ToString) -> Self {
        ExtractionError::ArchiveCorrupt {
            entry: entry.into(),
            cause: cause.to_string(),
        }
    }

    pub fn decode_failed(format: impl Into<String>, cause: impl ToString) -> Self {
        ExtractionError::DecodeFailed {
            format: format.into(),
            cause: cause.to_string(),
        }
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(e: std::io::Error) -> Self {
        ExtractionError::IoFailed {
            cause: e.to_string(),
        }
    }
}

/// A leaf (or sub-archive) that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeafFailure {
    /// Nesting path, e.g. `outer.zip/inner.zip/list.pdf`
    pub path: String,
    pub error: ExtractionError,
}

impl LeafFailure {
    pub fn new(path: impl Into<String>, error: ExtractionError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

/// Terminal result of one top-level invocation.
///
/// Always carries every address recovered, even when some leaves failed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractionReport {
    /// Name of the input that started the invocation
    pub source: String,
    #[ts(type = "Array<string>")]
    pub emails: EmailSet,
    pub failures: Vec<LeafFailure>,
    pub leaves_processed: u64,
    pub started_at: i64,
    pub finished_at: i64,
}

impl ExtractionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Treat any failure as an error while keeping the recovered addresses.
    pub fn into_result(self) -> Result<EmailSet, PartialExtraction> {
        if self.failures.is_empty() {
            Ok(self.emails)
        } else {
            Err(PartialExtraction {
                input: self.source,
                emails: self.emails,
                failures: self.failures,
            })
        }
    }
}

/// Aggregate failure of an invocation where some leaves could not be read.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} of the entries in {input} failed; {} addresses recovered", failures.len(), emails.len())]
pub struct PartialExtraction {
    pub input: String,
    pub emails: EmailSet,
    pub failures: Vec<LeafFailure>,
}

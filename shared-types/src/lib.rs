pub mod blob;
pub mod decoder;
pub mod email_set;
pub mod extraction;
pub mod format;

pub use blob::{ArchiveEntry, NamedBlob};
pub use decoder::{ArchiveDecoder, DecodedContent, DocumentDecoder};
pub use email_set::EmailSet;
pub use format::{ArchiveFormat, DocumentFormat, FileKind};

// Re-export extraction types
pub use extraction::*;

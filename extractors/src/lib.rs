//! Extractors Crate
//!
//! Recovers every email address contained in a named blob of bytes, however
//! deeply it is buried in nested archives or binary documents.
//!
//! # Architecture
//!
//! - **Types**: `NamedBlob`, `ArchiveEntry`, `EmailSet`, the decoder traits and
//!   the error taxonomy live in the `shared-types` crate
//! - **Decoders**: container formats in [`archive`], document formats in
//!   [`formats`]
//! - **Pipeline**: [`Dispatcher`] routes by extension, [`Flattener`] walks
//!   archive trees concurrently, [`Aggregator`] merges and deduplicates
//!
//! # Supported Inputs
//!
//! - Archives: ZIP, RAR, 7Z, TAR, TAR.GZ, GZ
//! - Documents: XLSX, XLS, ODS, DOCX, PDF
//! - Anything else is read as UTF-8 text
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::EmailExtractor;
//! use shared_types::NamedBlob;
//!
//! let extractor = EmailExtractor::with_defaults();
//! let report = extractor.extract(NamedBlob::new("mail.zip", bytes)).await;
//! println!("{}", report.emails.join("\n"));
//! ```

pub mod aggregate;
pub mod archive;
pub mod dispatch;
pub mod extractor;
pub mod flatten;
pub mod formats;
pub mod pattern;
pub mod settings;

pub use aggregate::{aggregate, Aggregator, Batch};
pub use dispatch::{Dispatcher, Route};
pub use extractor::EmailExtractor;
pub use flatten::Flattener;
pub use pattern::{EmailMatcher, EMAIL_PATTERN};
pub use settings::ExtractorSettings;

// Re-export the shared types callers need alongside the extractor
pub use shared_types::{EmailSet, ExtractionError, ExtractionReport, LeafFailure, NamedBlob};

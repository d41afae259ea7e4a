//! 7Z unpacking using sevenz-rust.

use sevenz_rust::{Password, SevenZReader};
use shared_types::{ArchiveDecoder, ArchiveEntry, ExtractionError, NamedBlob};
use std::io::Cursor;

pub struct SevenZDecoder;

impl SevenZDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SevenZDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveDecoder for SevenZDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["7z"]
    }

    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        let corrupt = |cause: String| ExtractionError::archive_corrupt(&blob.name, cause);

        // Empty password: encrypted archives fail here and are reported as corrupt
        let mut reader = SevenZReader::new(
            Cursor::new(blob.bytes.as_slice()),
            blob.bytes.len() as u64,
            Password::empty(),
        )
        .map_err(|e| corrupt(e.to_string()))?;

        let mut entries = Vec::new();

        let walked = reader.for_each_entries(|entry, entry_reader| {
            if entry.is_directory() {
                return Ok(true);
            }

            let mut contents = Vec::new();
            match entry_reader.read_to_end(&mut contents) {
                Ok(_) => entries.push(ArchiveEntry::leaf(entry.name(), contents)),
                Err(e) => {
                    let error = ExtractionError::archive_corrupt(entry.name(), e);
                    entries.push(ArchiveEntry::unreadable(entry.name(), error));
                }
            }
            Ok(true)
        });

        match walked {
            Ok(()) => Ok(entries),
            Err(e) if entries.is_empty() => Err(corrupt(e.to_string())),
            Err(e) => {
                // Members already read survive a failure further down the stream
                entries.push(ArchiveEntry::unreadable("", corrupt(e.to_string())));
                Ok(entries)
            }
        }
    }
}

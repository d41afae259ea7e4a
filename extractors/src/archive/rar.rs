//! RAR unpacking.
//!
//! The `rar` crate only works on paths, so the blob is spilled to a temporary
//! file and extracted into a temporary directory, then read back in archive
//! order.

use shared_types::{ArchiveDecoder, ArchiveEntry, ExtractionError, NamedBlob};
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub struct RarDecoder;

impl RarDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RarDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveDecoder for RarDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["rar"]
    }

    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        self.unpack_in(blob, &std::env::temp_dir())
    }
}

impl RarDecoder {
    /// Spill and extract under `temp_root`.
    fn unpack_in(
        &self,
        blob: &NamedBlob,
        temp_root: &Path,
    ) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        let corrupt = |cause: String| ExtractionError::archive_corrupt(&blob.name, cause);

        let spill = |e: std::io::Error| corrupt(format!("temporary extraction failed: {e}"));
        let mut archive_file = tempfile::Builder::new()
            .suffix(".rar")
            .tempfile_in(temp_root)
            .map_err(spill)?;
        archive_file.write_all(&blob.bytes).map_err(spill)?;
        archive_file.flush().map_err(spill)?;

        let extract_dir = tempfile::tempdir_in(temp_root).map_err(spill)?;

        let archive_path = archive_file
            .path()
            .to_str()
            .ok_or_else(|| corrupt("temporary path contains invalid UTF-8".to_string()))?;
        let extract_path = extract_dir
            .path()
            .to_str()
            .ok_or_else(|| corrupt("temporary path contains invalid UTF-8".to_string()))?;

        let archive = rar::Archive::extract_all(archive_path, extract_path, "")
            .map_err(|e| corrupt(format!("{e:?}")))?;

        let mut entries = Vec::new();
        for file in &archive.files {
            let name = file.name.to_string().replace('\\', "/");
            let extracted = extract_dir.path().join(&name);
            if !extracted.is_file() {
                debug!("Skipping non-file RAR entry {}", name);
                continue;
            }

            match std::fs::read(&extracted) {
                Ok(contents) => entries.push(ArchiveEntry::leaf(name, contents)),
                Err(e) => {
                    let error = ExtractionError::archive_corrupt(&name, e);
                    entries.push(ArchiveEntry::unreadable(name, error));
                }
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rar_is_corrupt() {
        let err = RarDecoder::new()
            .unpack(&NamedBlob::new("bad.rar", b"Rar! but not really".to_vec()))
            .unwrap_err();

        match err {
            ExtractionError::ArchiveCorrupt { entry, .. } => assert_eq!(entry, "bad.rar"),
            other => panic!("Expected ArchiveCorrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_temporary_spill_failure_is_scoped_to_the_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = RarDecoder::new()
            .unpack_in(
                &NamedBlob::new("inner.rar", b"Rar!".to_vec()),
                &dir.path().join("missing"),
            )
            .unwrap_err();

        match err {
            ExtractionError::ArchiveCorrupt { entry, cause } => {
                assert_eq!(entry, "inner.rar");
                assert!(cause.starts_with("temporary extraction failed"));
            }
            other => panic!("Expected ArchiveCorrupt, got {other:?}"),
        }
    }
}

use flate2::read::GzDecoder;
use shared_types::{ArchiveDecoder, ArchiveEntry, ExtractionError, NamedBlob};
use std::io::Read;

/// A bare `.gz` stream decodes to one entry named after the compressed blob
/// with its `.gz` suffix removed.
pub struct GzipDecoder;

impl GzipDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GzipDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveDecoder for GzipDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["gz"]
    }

    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        let mut contents = Vec::new();
        GzDecoder::new(blob.bytes.as_slice())
            .read_to_end(&mut contents)
            .map_err(|e| ExtractionError::archive_corrupt(&blob.name, e))?;

        Ok(vec![ArchiveEntry::leaf(strip_gz_suffix(&blob.name), contents)])
    }
}

pub(crate) fn strip_gz_suffix(name: &str) -> String {
    let split = name.len().saturating_sub(3);
    match name.get(split..) {
        Some(suffix) if split > 0 && suffix.eq_ignore_ascii_case(".gz") => name[..split].to_string(),
        _ => name.to_string(),
    }
}

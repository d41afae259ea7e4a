//! TAR and TAR.GZ unpacking.

use flate2::read::GzDecoder;
use shared_types::{ArchiveDecoder, ArchiveEntry, ExtractionError, NamedBlob};
use std::io::Read;
use tar::Archive;

/// Plain tar, or gzip-compressed tar when `gzipped` is set.
pub struct TarDecoder {
    gzipped: bool,
}

impl TarDecoder {
    pub fn new() -> Self {
        Self { gzipped: false }
    }

    pub fn gzipped() -> Self {
        Self { gzipped: true }
    }
}

impl Default for TarDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveDecoder for TarDecoder {
    fn extensions(&self) -> &[&'static str] {
        if self.gzipped {
            &["tar.gz"]
        } else {
            &["tar"]
        }
    }

    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        let result = if self.gzipped {
            read_entries(GzDecoder::new(blob.bytes.as_slice()), &blob.name)
        } else {
            read_entries(blob.bytes.as_slice(), &blob.name)
        };

        result.map_err(|e| ExtractionError::archive_corrupt(&blob.name, e))
    }
}

/// One leaf per regular file, names as stored. Links and directories are
/// skipped.
///
/// A member whose data cannot be read becomes `Unreadable`. Once a header
/// cannot be parsed the rest of the stream is lost: what was read so far is
/// kept and the container itself is marked unreadable. Only a stream with no
/// readable header at all is an error.
fn read_entries<R: Read>(reader: R, archive_name: &str) -> std::io::Result<Vec<ArchiveEntry>> {
    let mut archive = Archive::new(reader);
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(e) if entries.is_empty() => return Err(e),
            Err(e) => {
                let error = ExtractionError::archive_corrupt(archive_name, e);
                entries.push(ArchiveEntry::unreadable("", error));
                break;
            }
        };
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = match entry.path() {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(e) => {
                let error = ExtractionError::archive_corrupt(archive_name, e);
                entries.push(ArchiveEntry::unreadable("", error));
                break;
            }
        };

        // The header size is untrusted, grow the buffer as data arrives
        let mut contents = Vec::new();
        match entry.read_to_end(&mut contents) {
            Ok(_) => entries.push(ArchiveEntry::leaf(name, contents)),
            Err(e) => {
                let error = ExtractionError::archive_corrupt(&name, e);
                entries.push(ArchiveEntry::unreadable(name, error));
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::fixtures::{gzip, tar_of};

    #[test]
    fn test_tar_entries_in_stored_order() {
        let bytes = tar_of(&[("people/b.txt", b"b@y.com"), ("a.txt", b"a@x.com")]);
        let entries = TarDecoder::new()
            .unpack(&NamedBlob::new("people.tar", bytes))
            .unwrap();

        assert_eq!(
            entries,
            vec![
                ArchiveEntry::leaf("people/b.txt", b"b@y.com".to_vec()),
                ArchiveEntry::leaf("a.txt", b"a@x.com".to_vec()),
            ]
        );
    }

    #[test]
    fn test_tar_gz_decompresses_first() {
        let bytes = gzip(&tar_of(&[("list.txt", b"list@x.com")]));
        let entries = TarDecoder::gzipped()
            .unpack(&NamedBlob::new("list.tar.gz", bytes))
            .unwrap();

        assert_eq!(entries, vec![ArchiveEntry::leaf("list.txt", b"list@x.com".to_vec())]);
    }

    #[test]
    fn test_corrupt_tar() {
        let err = TarDecoder::new()
            .unpack(&NamedBlob::new("bad.tar", vec![b'x'; 1024]))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ArchiveCorrupt { ref entry, .. } if entry == "bad.tar"
        ));
    }

    #[test]
    fn test_oversized_header_does_not_preallocate() {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(1 << 60);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, "big.txt", &b"t@x.com"[..])
            .unwrap();
        let bytes = builder.into_inner().unwrap();

        match TarDecoder::new().unpack(&NamedBlob::new("t.tar", bytes)) {
            Ok(entries) => assert!(entries
                .iter()
                .any(|e| matches!(e, ArchiveEntry::Unreadable { path, .. } if path.is_empty()))),
            Err(e) => assert!(matches!(
                e,
                ExtractionError::ArchiveCorrupt { ref entry, .. } if entry == "t.tar"
            )),
        }
    }

    #[test]
    fn test_truncated_stream_keeps_earlier_members() {
        let mut bytes = tar_of(&[("a.txt", b"a@x.com"), ("b.txt", b"b@y.com")]);
        // Second header starts after the first header and its padded data block
        bytes[1024 + 148..1024 + 156].copy_from_slice(b"garbage!");

        let entries = TarDecoder::new()
            .unpack(&NamedBlob::new("cut.tar", bytes))
            .unwrap();

        assert_eq!(entries[0], ArchiveEntry::leaf("a.txt", b"a@x.com".to_vec()));
        match &entries[1] {
            ArchiveEntry::Unreadable { path, error } => {
                assert!(path.is_empty());
                assert!(matches!(
                    error,
                    ExtractionError::ArchiveCorrupt { entry, .. } if entry == "cut.tar"
                ));
            }
            other => panic!("Expected unreadable container, got {other:?}"),
        }
    }

    #[test]
    fn test_tar_gz_with_plain_tar_bytes_is_corrupt() {
        let bytes = tar_of(&[("list.txt", b"list@x.com")]);
        let err = TarDecoder::gzipped()
            .unpack(&NamedBlob::new("fake.tar.gz", bytes))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ArchiveCorrupt { .. }));
    }
}

//! ZIP unpacking into a directory tree.

use shared_types::{ArchiveDecoder, ArchiveEntry, ExtractionError, NamedBlob};
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub struct ZipDecoder;

impl ZipDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZipDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveDecoder for ZipDecoder {
    fn extensions(&self) -> &[&'static str] {
        &["zip"]
    }

    /// Entries are arranged by path: directories (explicit or implied by a
    /// member's path) become `Directory` nodes, members are read fully into
    /// memory as leaves. Order follows the central directory. A member that
    /// fails to read stays in the tree as `Unreadable`.
    fn unpack(&self, blob: &NamedBlob) -> Result<Vec<ArchiveEntry>, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(blob.bytes.as_slice()))
            .map_err(|e| ExtractionError::archive_corrupt(&blob.name, e))?;
        let mut root = Vec::new();

        for i in 0..archive.len() {
            let mut zip_file = match archive.by_index(i) {
                Ok(zip_file) => zip_file,
                Err(e) => {
                    let path = format!("#{i}");
                    let error = ExtractionError::archive_corrupt(&path, e);
                    root.push(ArchiveEntry::unreadable(path, error));
                    continue;
                }
            };
            let raw_name = zip_file.name().replace('\\', "/");
            let components: Vec<&str> = raw_name.split('/').filter(|c| !c.is_empty()).collect();

            if zip_file.is_dir() {
                insert_entry(&mut root, "", &components, Member::Directory);
                continue;
            }

            // Declared sizes are untrusted, let the buffer grow as data arrives
            let mut contents = Vec::new();
            let member = match zip_file.read_to_end(&mut contents) {
                Ok(_) => Member::File(contents),
                Err(e) => Member::Unreadable(ExtractionError::archive_corrupt(&raw_name, e)),
            };
            insert_entry(&mut root, "", &components, member);
        }

        Ok(root)
    }
}

enum Member {
    Directory,
    File(Vec<u8>),
    Unreadable(ExtractionError),
}

/// Place a member under `siblings`, creating intermediate directories.
fn insert_entry(
    siblings: &mut Vec<ArchiveEntry>,
    parent: &str,
    components: &[&str],
    member: Member,
) {
    let Some((first, rest)) = components.split_first() else {
        return;
    };

    if rest.is_empty() {
        let path = format!("{parent}{first}");
        match member {
            Member::File(bytes) => siblings.push(ArchiveEntry::leaf(path, bytes)),
            Member::Unreadable(error) => siblings.push(ArchiveEntry::unreadable(path, error)),
            Member::Directory => {
                directory_mut(siblings, parent, first);
            }
        }
        return;
    }

    if let ArchiveEntry::Directory { path, children } = directory_mut(siblings, parent, first) {
        let path = path.clone();
        insert_entry(children, &path, rest, member);
    }
}

fn directory_mut<'a>(
    siblings: &'a mut Vec<ArchiveEntry>,
    parent: &str,
    name: &str,
) -> &'a mut ArchiveEntry {
    let path = format!("{parent}{name}/");
    let existing = siblings
        .iter()
        .position(|e| matches!(e, ArchiveEntry::Directory { path: p, .. } if *p == path));

    let index = existing.unwrap_or_else(|| {
        siblings.push(ArchiveEntry::Directory {
            path,
            children: Vec::new(),
        });
        siblings.len() - 1
    });
    &mut siblings[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::fixtures::zip_of;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_flat_zip() {
        let bytes = zip_of(&[("a.txt", b"a@x.com"), ("b.csv", b"b@y.com")]);
        let entries = ZipDecoder::new()
            .unpack(&NamedBlob::new("flat.zip", bytes))
            .unwrap();

        assert_eq!(
            entries,
            vec![
                ArchiveEntry::leaf("a.txt", b"a@x.com".to_vec()),
                ArchiveEntry::leaf("b.csv", b"b@y.com".to_vec()),
            ]
        );
    }

    #[test]
    fn test_nested_paths_become_directories() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.add_directory("docs/", options).unwrap();
        writer.start_file("docs/team/list.txt", options).unwrap();
        writer.write_all(b"team@x.com").unwrap();
        writer.start_file("docs/readme.txt", options).unwrap();
        writer.write_all(b"readme").unwrap();
        writer.start_file("top.txt", options).unwrap();
        writer.write_all(b"top").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let entries = ZipDecoder::new()
            .unpack(&NamedBlob::new("tree.zip", bytes))
            .unwrap();

        assert_eq!(entries.len(), 2);
        match &entries[0] {
            ArchiveEntry::Directory { path, children } => {
                assert_eq!(path, "docs/");
                assert_eq!(children.len(), 2);
                assert_eq!(children[0].path(), "docs/team/");
                assert_eq!(children[1].path(), "docs/readme.txt");
            }
            other => panic!("Expected directory, got {other:?}"),
        }
        assert_eq!(entries[1].path(), "top.txt");
        assert_eq!(entries[0].leaf_count(), 2);
    }

    #[test]
    fn test_unreadable_member_keeps_siblings() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("good.txt", options).unwrap();
        writer.write_all(b"good@x.com").unwrap();
        writer.start_file("bad.txt", options).unwrap();
        writer.write_all(b"bad@x.com").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        // Stored data sits verbatim in the archive, flipping a byte breaks its CRC
        let at = bytes.windows(9).position(|w| w == b"bad@x.com").unwrap();
        bytes[at] ^= 0x20;

        let entries = ZipDecoder::new()
            .unpack(&NamedBlob::new("o.zip", bytes))
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ArchiveEntry::leaf("good.txt", b"good@x.com".to_vec()));
        match &entries[1] {
            ArchiveEntry::Unreadable { path, error } => {
                assert_eq!(path, "bad.txt");
                assert!(matches!(
                    error,
                    ExtractionError::ArchiveCorrupt { entry, .. } if entry == "bad.txt"
                ));
            }
            other => panic!("Expected unreadable member, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_zip_names_the_archive() {
        let err = ZipDecoder::new()
            .unpack(&NamedBlob::new("broken.zip", b"PK not really".to_vec()))
            .unwrap_err();

        match err {
            ExtractionError::ArchiveCorrupt { entry, .. } => assert_eq!(entry, "broken.zip"),
            other => panic!("Expected ArchiveCorrupt, got {other:?}"),
        }
    }
}

use crate::ExtractionError;
use serde::{Deserialize, Serialize};

/// A file name paired with its raw bytes.
///
/// Created at every decode boundary: the initial input and every archive
/// entry. Decoders never mutate a blob, they consume it and produce new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Re-wrap the same bytes under another name, e.g. after stripping `.gz`.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: self.bytes,
        }
    }

    /// Lowercase extension as used for dispatch.
    ///
    /// `tar.gz` is recognised as a two-segment extension before falling back
    /// to the last dot-delimited segment. Returns `None` for names without a
    /// dot in their final path component.
    pub fn extension(&self) -> Option<String> {
        let file_name = self
            .name
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.name)
            .to_lowercase();

        if file_name.ends_with(".tar.gz") && file_name.len() > ".tar.gz".len() {
            return Some("tar.gz".to_string());
        }

        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_string()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Transient view of one archive member, consumed by the flattener.
///
/// Zip archives are walked as a tree, so directories carry their children;
/// every other format yields leaves only. A member that could not be read is
/// kept in place as `Unreadable` so its siblings still get processed. An
/// empty `path` on an `Unreadable` entry stands for the container itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    Directory {
        path: String,
        children: Vec<ArchiveEntry>,
    },
    Leaf(NamedBlob),
    Unreadable {
        path: String,
        error: ExtractionError,
    },
}

impl ArchiveEntry {
    pub fn leaf(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        ArchiveEntry::Leaf(NamedBlob::new(name, bytes))
    }

    pub fn unreadable(path: impl Into<String>, error: ExtractionError) -> Self {
        ArchiveEntry::Unreadable {
            path: path.into(),
            error,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ArchiveEntry::Directory { path, .. } | ArchiveEntry::Unreadable { path, .. } => path,
            ArchiveEntry::Leaf(blob) => &blob.name,
        }
    }

    /// Number of readable leaves reachable from this entry.
    pub fn leaf_count(&self) -> usize {
        match self {
            ArchiveEntry::Directory { children, .. } => {
                children.iter().map(ArchiveEntry::leaf_count).sum()
            }
            ArchiveEntry::Leaf(_) => 1,
            ArchiveEntry::Unreadable { .. } => 0,
        }
    }
}

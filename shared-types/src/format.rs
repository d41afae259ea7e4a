use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Container formats that are unpacked and flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    Zip,
    Rar,
    SevenZ,
    Tar,
    Gzip,
    TarGz,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 6] = [
        ArchiveFormat::Zip,
        ArchiveFormat::Rar,
        ArchiveFormat::SevenZ,
        ArchiveFormat::Tar,
        ArchiveFormat::Gzip,
        ArchiveFormat::TarGz,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Rar => "rar",
            ArchiveFormat::SevenZ => "7z",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::Gzip => "gz",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }
}

/// Binary document formats handled by a format decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Xlsx,
    Xls,
    Ods,
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 5] = [
        DocumentFormat::Xlsx,
        DocumentFormat::Xls,
        DocumentFormat::Ods,
        DocumentFormat::Docx,
        DocumentFormat::Pdf,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Xls => "xls",
            DocumentFormat::Ods => "ods",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    pub fn is_spreadsheet(self) -> bool {
        matches!(
            self,
            DocumentFormat::Xlsx | DocumentFormat::Xls | DocumentFormat::Ods
        )
    }
}

/// Dispatch bucket of a named blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "format", rename_all = "kebab-case")]
pub enum FileKind {
    Archive(ArchiveFormat),
    Document(DocumentFormat),
    PlainText,
}

impl FileKind {
    /// Classify by normalised extension. Unknown or missing extensions are
    /// plain text; classification itself never fails.
    pub fn classify(extension: Option<&str>) -> Self {
        let Some(ext) = extension else {
            return FileKind::PlainText;
        };

        if let Some(format) = ArchiveFormat::from_extension(ext) {
            FileKind::Archive(format)
        } else if let Some(format) = DocumentFormat::from_extension(ext) {
            FileKind::Document(format)
        } else {
            FileKind::PlainText
        }
    }

    pub fn is_archive(self) -> bool {
        matches!(self, FileKind::Archive(_))
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

//! Container decoders: bytes in, named entries out.

mod gzip;
mod rar;
mod sevenz;
mod tar;
mod zip;

pub use self::gzip::GzipDecoder;
pub use self::rar::RarDecoder;
pub use self::sevenz::SevenZDecoder;
pub use self::tar::TarDecoder;
pub use self::zip::ZipDecoder;

use shared_types::{ArchiveDecoder, ArchiveFormat};
use std::sync::Arc;

/// Decoder for one container format.
pub fn decoder_for(format: ArchiveFormat) -> Arc<dyn ArchiveDecoder> {
    match format {
        ArchiveFormat::Zip => Arc::new(ZipDecoder::new()),
        ArchiveFormat::Rar => Arc::new(RarDecoder::new()),
        ArchiveFormat::SevenZ => Arc::new(SevenZDecoder::new()),
        ArchiveFormat::Tar => Arc::new(TarDecoder::new()),
        ArchiveFormat::Gzip => Arc::new(GzipDecoder::new()),
        ArchiveFormat::TarGz => Arc::new(TarDecoder::gzipped()),
    }
}

/// In-memory archive builders shared by the unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use sevenz_rust::{SevenZArchiveEntry, SevenZWriter};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    pub(crate) fn zip_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub(crate) fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *contents).unwrap();
        }
        builder.into_inner().unwrap()
    }

    pub(crate) fn sevenz_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SevenZWriter::new(Cursor::new(Vec::new())).unwrap();
        for (i, (name, contents)) in files.iter().enumerate() {
            let path = dir.path().join(format!("member-{i}"));
            std::fs::write(&path, contents).unwrap();
            let entry = SevenZArchiveEntry::from_path(&path, name.to_string());
            writer
                .push_archive_entry(entry, Some(std::fs::File::open(&path).unwrap()))
                .unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub(crate) fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }
}

//! ZIP packaging of converted resource files

use crate::config::ConverterConfig;
use crate::converter::{self, Bundle};
use crate::error::{SheetError, SheetResult};
use std::io::{Cursor, Write};
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Pack named text entries into an in-memory ZIP archive
///
/// Entries are written in the given order. A repeated name is rejected by
/// the archive writer.
///
/// # Errors
/// - `PackagingError` if the writer fails; no partial archive is returned
pub fn build_archive(entries: &[(String, String)]) -> SheetResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in entries {
        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| SheetError::PackagingError(format!("{}: {}", name, e)))?;
    }

    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();
    debug!(entries = entries.len(), bytes = bytes.len(), "archive built");
    Ok(bytes)
}

/// Serialize every document of `bundle` and pack them into one archive
pub fn package(bundle: &Bundle, config: &ConverterConfig) -> SheetResult<Vec<u8>> {
    let entries = bundle.file_entries(&config.file_pattern)?;
    build_archive(&entries)
}

/// Convert CSV bytes straight to archive bytes
///
/// # Errors
/// Any conversion or packaging error; nothing is produced on failure.
pub fn convert_to_archive(csv_bytes: &[u8], config: &ConverterConfig) -> SheetResult<Vec<u8>> {
    let bundle = converter::convert(csv_bytes)?;
    package(&bundle, config)
}

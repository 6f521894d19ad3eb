//! Resource documents back to a translation sheet
//!
//! The inverse of [`crate::converter::convert`]: a `key` column followed by
//! one column per language, one row per key in first-seen order across the
//! documents. Missing translations are left blank, so converting the output
//! again reproduces every non-empty entry.

use crate::document::ResourceDocument;
use crate::error::{SheetError, SheetResult};
use crate::template::KEY_HEADER;
use std::collections::HashSet;

/// Write `(language, document)` pairs as standard CSV text
///
/// Fields are quoted only when needed. Output ends with a newline.
///
/// # Errors
/// - `ConversionFailed` if the CSV writer fails
pub fn flatten(documents: &[(String, ResourceDocument)]) -> SheetResult<String> {
    let mut keys: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (_, document) in documents {
        for key in document.keys() {
            if seen.insert(key) {
                keys.push(key);
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let mut header = vec![KEY_HEADER];
    header.extend(documents.iter().map(|(code, _)| code.as_str()));
    writer.write_record(&header)?;

    for key in keys {
        let mut row = vec![key];
        row.extend(
            documents
                .iter()
                .map(|(_, document)| document.get(key).unwrap_or("")),
        );
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SheetError::ConversionFailed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SheetError::ConversionFailed(e.to_string()))
}

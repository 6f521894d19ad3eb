//! CSV to per-language resource documents
//!
//! Conversion runs in a fixed sequence and stops at the first failure:
//!
//! 1. **Parse** - read the CSV with a header row, skipping blank lines
//! 2. **Validate header** - the first header cell must be exactly `key`
//! 3. **Validate languages** - at least one non-empty header cell after `key`
//! 4. **Build documents** - one `ResourceDocument` per language column
//!
//! Serialization and packaging live in [`crate::archive`].
//!
//! # Document rules
//!
//! A row contributes `key -> value` to a language only when the key is
//! non-empty and the trimmed value is non-empty. Blank cells are skipped so
//! partially translated sheets convert cleanly. A key repeated on a later row
//! overwrites the earlier value (last write wins) and keeps its first
//! position.

use crate::config::FilePattern;
use crate::document::ResourceDocument;
use crate::error::{SheetError, SheetResult};
use crate::template::KEY_HEADER;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Matches cells exported before the spreadsheet evaluated the template formula
static UNEVALUATED_FORMULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*=\s*GOOGLETRANSLATE\s*\(").expect("formula pattern is valid")
});

/// Parsed CSV: header cells and data records
#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

/// A language column and where its values are read from
#[derive(Debug, Clone, PartialEq, Eq)]
struct LanguageColumn {
    code: String,
    column: usize,
}

/// Converted documents, one per language column, in header order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    documents: Vec<(String, ResourceDocument)>,
}

impl Bundle {
    pub fn new(documents: Vec<(String, ResourceDocument)>) -> Self {
        Bundle { documents }
    }

    /// Language codes in header order
    pub fn languages(&self) -> Vec<&str> {
        self.documents.iter().map(|(code, _)| code.as_str()).collect()
    }

    pub fn document(&self, code: &str) -> Option<&ResourceDocument> {
        self.documents
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, document)| document)
    }

    pub fn documents(&self) -> &[(String, ResourceDocument)] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// File name and serialized text for every language
    ///
    /// # Errors
    /// - `ConversionFailed` if a document cannot be serialized
    pub fn file_entries(&self, pattern: &FilePattern) -> SheetResult<Vec<(String, String)>> {
        self.documents
            .iter()
            .map(|(code, document)| Ok((pattern.file_name(code), document.to_arb_string()?)))
            .collect()
    }

    /// `(language, key)` pairs whose value is still a raw `GOOGLETRANSLATE` formula
    pub fn unevaluated_formulas(&self) -> Vec<(&str, &str)> {
        self.documents
            .iter()
            .flat_map(|(code, document)| {
                document
                    .iter()
                    .filter(|(_, value)| UNEVALUATED_FORMULA.is_match(value))
                    .map(move |(key, _)| (code.as_str(), key))
            })
            .collect()
    }
}

/// Parse CSV bytes with the first row as header
///
/// A leading UTF-8 byte order mark is ignored and blank lines are skipped.
/// Records may be shorter or longer than the header.
///
/// # Errors
/// - `ParseError` with the reader's message, e.g. for invalid UTF-8
pub fn parse_sheet(bytes: &[u8]) -> SheetResult<Sheet> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        records.push(record);
    }

    debug!(
        columns = headers.len(),
        rows = records.len(),
        "CSV parsed"
    );
    Ok(Sheet { headers, records })
}

/// Check the header and list its language columns
///
/// Empty header cells are ignored. A language named twice appears once, at
/// its first position, and reads from its last column.
fn language_columns(headers: &[String]) -> SheetResult<Vec<LanguageColumn>> {
    if headers.first().map(String::as_str) != Some(KEY_HEADER) {
        return Err(SheetError::MissingKeyColumn);
    }

    let mut columns: Vec<LanguageColumn> = Vec::new();
    for (column, code) in headers.iter().enumerate().skip(1) {
        if code.is_empty() {
            continue;
        }
        match columns.iter_mut().find(|c| &c.code == code) {
            Some(existing) => {
                warn!(language = %code, column, "duplicate language column, later column wins");
                existing.column = column;
            }
            None => columns.push(LanguageColumn {
                code: code.clone(),
                column,
            }),
        }
    }

    if columns.is_empty() {
        return Err(SheetError::NoLanguageColumns);
    }
    Ok(columns)
}

/// Build one document per language from a parsed sheet
///
/// # Errors
/// - `MissingKeyColumn` if the first header is not `key`
/// - `NoLanguageColumns` if no language column follows it
pub fn build_bundle(sheet: &Sheet) -> SheetResult<Bundle> {
    let columns = language_columns(&sheet.headers)?;

    let documents = columns
        .into_iter()
        .map(|LanguageColumn { code, column }| {
            let mut document = ResourceDocument::new();
            for record in &sheet.records {
                let key = match record.get(0) {
                    Some(key) if !key.is_empty() => key,
                    _ => continue,
                };
                let value = match record.get(column) {
                    Some(value) if !value.trim().is_empty() => value,
                    _ => continue,
                };
                if let Some(previous) = document.insert(key, value) {
                    warn!(language = %code, key, %previous, "duplicate key, later row wins");
                }
            }
            debug!(language = %code, entries = document.len(), "document built");
            (code, document)
        })
        .collect();

    let bundle = Bundle::new(documents);
    for (code, key) in bundle.unevaluated_formulas() {
        warn!(language = code, key, "value is an unevaluated GOOGLETRANSLATE formula");
    }
    Ok(bundle)
}

/// Parse and convert CSV bytes into per-language documents
///
/// # Errors
/// - `ParseError`, `MissingKeyColumn` or `NoLanguageColumns`; nothing is
///   returned on failure
pub fn convert(bytes: &[u8]) -> SheetResult<Bundle> {
    let sheet = parse_sheet(bytes)?;
    build_bundle(&sheet)
}

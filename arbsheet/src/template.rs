//! Seed CSV templates wired with spreadsheet translation formulas
//!
//! The generated sheet has a `key` column, a blank base-language column and
//! one column per target language holding
//! `=GOOGLETRANSLATE($B<row>;"<base>";"<target>")`. Filling in column B in
//! a spreadsheet fills every other language.
//!
//! # Formula cells
//!
//! Cells starting with `=` are written bare so that spreadsheet software
//! evaluates them. Every other cell is double-quoted. This also means a key
//! starting with `=` is emitted bare and will be read as a formula: the
//! output is meant for a spreadsheet, and opening it with anything that
//! evaluates formulas from untrusted keys carries formula-injection risk.

use crate::error::{SheetError, SheetResult};
use tracing::debug;

/// Header cell of the key column
pub const KEY_HEADER: &str = "key";

/// Spreadsheet column holding the base-language text
const BASE_COLUMN: char = 'B';

/// Build the translation formula for one cell
///
/// `row` is the 1-based spreadsheet row (the header is row 1).
pub fn translate_formula(row: usize, base_lang: &str, target_lang: &str) -> String {
    format!(
        "=GOOGLETRANSLATE(${}{};\"{}\";\"{}\")",
        BASE_COLUMN, row, base_lang, target_lang
    )
}

/// Quote one field. Formula fields (leading `=`) are passed through untouched.
fn encode_field(value: &str) -> String {
    if value.starts_with('=') {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}

fn encode_row(row: &[String]) -> String {
    row.iter()
        .map(|v| encode_field(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Generate the template CSV
///
/// # Arguments
/// * `base_lang` - Code of the language typed into column B
/// * `target_langs` - Target codes in selection order. `base_lang` and
///   repeated codes are dropped.
/// * `seed_keys` - One data row per key
///
/// # Returns
/// CSV text: rows joined with `\n`, no trailing newline.
///
/// # Errors
/// - `EmptyTargetSet` if no target remains after removing `base_lang`
pub fn generate<T: AsRef<str>, K: AsRef<str>>(
    base_lang: &str,
    target_langs: &[T],
    seed_keys: &[K],
) -> SheetResult<String> {
    let mut targets: Vec<&str> = Vec::with_capacity(target_langs.len());
    for lang in target_langs {
        let lang: &str = lang.as_ref();
        if lang != base_lang && !targets.contains(&lang) {
            targets.push(lang);
        }
    }
    if targets.is_empty() {
        return Err(SheetError::EmptyTargetSet);
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(seed_keys.len() + 1);

    let mut header = vec![KEY_HEADER.to_string(), base_lang.to_string()];
    header.extend(targets.iter().map(|t| t.to_string()));
    rows.push(header);

    for (i, key) in seed_keys.iter().enumerate() {
        // Header is row 1, first data row is row 2
        let row_number = i + 2;
        let mut row = vec![key.as_ref().to_string(), String::new()];
        row.extend(
            targets
                .iter()
                .map(|target| translate_formula(row_number, base_lang, target)),
        );
        rows.push(row);
    }

    debug!(
        base = base_lang,
        targets = targets.len(),
        keys = seed_keys.len(),
        "template generated"
    );

    Ok(rows
        .iter()
        .map(|row| encode_row(row))
        .collect::<Vec<_>>()
        .join("\n"))
}

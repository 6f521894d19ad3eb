use crate::catalog::{Catalog, Language};
use crate::config::FilePattern;
use crate::document::ResourceDocument;
use crate::error::{SheetError, SheetResult};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Load a language catalog from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// [
///     { "code": "en", "name": "English" },
///     { "code": "fr", "name": "French" }
/// ]
/// ```
///
/// Order in the file is display order.
///
/// # Errors
/// - `CatalogError` if the file is unreadable, not valid JSON, or fails
///   catalog validation
pub fn load_catalog_from_file(path: &Path) -> SheetResult<Catalog> {
    let content = fs::read_to_string(path).map_err(|e| {
        SheetError::CatalogError(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    let languages: Vec<Language> = serde_json::from_str(&content).map_err(|e| {
        SheetError::CatalogError(format!(
            "Failed to parse catalog from '{}': {}",
            path.display(),
            e
        ))
    })?;

    Catalog::new(languages)
}

/// Parse the text of one ARB file into a document
///
/// Keys starting with `@` are ARB metadata and are skipped, as are
/// non-string values.
pub fn parse_arb(content: &str) -> SheetResult<ResourceDocument> {
    let json: Value = serde_json::from_str(content)?;

    let obj = json.as_object().ok_or_else(|| {
        SheetError::ConversionFailed("ARB root must be an object".to_string())
    })?;

    let mut document = ResourceDocument::new();
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }
        match value.as_str() {
            Some(message) => {
                document.insert(key, message);
            }
            None => warn!(key = %key, "message is not a string, skipping"),
        }
    }
    Ok(document)
}

/// Load all resource files in `dir` whose names match `pattern`
///
/// For the default pattern `app_en.arb` -> locale `"en"`. Files that do not
/// match the pattern are ignored. Results are sorted by language code.
///
/// # Errors
/// - `IoError` if the directory cannot be read
/// - `ConversionFailed` if a matching file is not a JSON object
pub fn load_documents_from_dir(
    dir: &Path,
    pattern: &FilePattern,
) -> SheetResult<Vec<(String, ResourceDocument)>> {
    if !dir.is_dir() {
        return Err(SheetError::IoError(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(code) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| pattern.code_from_file_name(name))
        else {
            continue;
        };

        let content = fs::read_to_string(&path)?;
        let document = parse_arb(&content).map_err(|e| {
            SheetError::ConversionFailed(format!("{}: {}", path.display(), e))
        })?;
        documents.push((code, document));
    }

    if documents.is_empty() {
        warn!(
            dir = %dir.display(),
            pattern = pattern.as_str(),
            "no resource files found"
        );
    }

    documents.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(documents)
}

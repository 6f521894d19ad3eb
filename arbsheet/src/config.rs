//! Output naming and seed configuration
//!
//! Defaults reproduce the file names the tool has always produced:
//! `translations_sample.csv` for templates, `arb_files.zip` holding one
//! `app_<code>.arb` per language for conversions.

use crate::error::{SheetError, SheetResult};

/// Placeholder replaced by the language code in a file name pattern
pub const CODE_PLACEHOLDER: &str = "{code}";

pub const DEFAULT_FILE_PATTERN: &str = "app_{code}.arb";
pub const DEFAULT_ARCHIVE_NAME: &str = "arb_files.zip";
pub const DEFAULT_TEMPLATE_NAME: &str = "translations_sample.csv";
pub const DEFAULT_SEED_KEY: &str = "greeting";

/// File name pattern for per-language resource files, e.g. `app_{code}.arb`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pattern: String,
}

impl FilePattern {
    /// # Errors
    /// - `InvalidPattern` if `{code}` is missing or the pattern names a path
    pub fn new(pattern: &str) -> SheetResult<Self> {
        if !pattern.contains(CODE_PLACEHOLDER) {
            return Err(SheetError::InvalidPattern(format!(
                "'{}' does not contain {}",
                pattern, CODE_PLACEHOLDER
            )));
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(SheetError::InvalidPattern(format!(
                "'{}' must be a file name, not a path",
                pattern
            )));
        }
        Ok(FilePattern {
            pattern: pattern.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn file_name(&self, code: &str) -> String {
        self.pattern.replace(CODE_PLACEHOLDER, code)
    }

    /// Recover the language code from a file name produced by this pattern
    pub fn code_from_file_name(&self, file_name: &str) -> Option<String> {
        let prefix = self.pattern.split(CODE_PLACEHOLDER).next()?;
        let rest = file_name.strip_prefix(prefix)?;
        rest.char_indices()
            .map(|(i, c)| &rest[..i + c.len_utf8()])
            .find(|code| self.file_name(code) == file_name)
            .map(str::to_string)
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        FilePattern {
            pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

/// Settings for CSV to ARB conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub file_pattern: FilePattern,
    pub archive_name: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            file_pattern: FilePattern::default(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

/// Settings for template generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub file_name: String,
    pub seed_keys: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            file_name: DEFAULT_TEMPLATE_NAME.to_string(),
            seed_keys: vec![DEFAULT_SEED_KEY.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let pattern = FilePattern::default();
        assert_eq!(pattern.file_name("es"), "app_es.arb");
        assert_eq!(pattern.file_name("zh-hans"), "app_zh-hans.arb");
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = FilePattern::new("intl_{code}.json").unwrap();
        assert_eq!(pattern.file_name("fr"), "intl_fr.json");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            FilePattern::new("app.arb"),
            Err(SheetError::InvalidPattern(_))
        ));
        assert!(matches!(
            FilePattern::new("l10n/app_{code}.arb"),
            Err(SheetError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_code_from_file_name() {
        let pattern = FilePattern::default();
        assert_eq!(pattern.code_from_file_name("app_en.arb"), Some("en".to_string()));
        assert_eq!(pattern.code_from_file_name("app_.arb"), None);
        assert_eq!(pattern.code_from_file_name("intl_en.arb"), None);
        assert_eq!(pattern.code_from_file_name("app_en.json"), None);
    }

    #[test]
    fn test_code_from_file_name_repeated_placeholder() {
        let pattern = FilePattern::new("{code}_{code}.arb").unwrap();
        assert_eq!(pattern.code_from_file_name("de_de.arb"), Some("de".to_string()));
        assert_eq!(pattern.code_from_file_name("de_fr.arb"), None);
    }

    #[test]
    fn test_defaults() {
        let converter = ConverterConfig::default();
        assert_eq!(converter.archive_name, "arb_files.zip");
        let template = TemplateConfig::default();
        assert_eq!(template.file_name, "translations_sample.csv");
        assert_eq!(template.seed_keys, vec!["greeting"]);
    }
}

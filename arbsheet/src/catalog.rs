//! Language catalog
//!
//! The catalog is the ordered list of languages offered to the selector.
//! Display order is the order of construction; lookups are by code.

use crate::error::{SheetError, SheetResult};
use icu_locale::LanguageIdentifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A selectable language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Lowercase language tag, e.g. `en`, `sah`
    pub code: String,
    /// Display name, e.g. `English`
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Language {
            code: code.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Case-insensitive substring match against name or code.
    ///
    /// `query` is expected to be lowercase already.
    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.code.to_lowercase().contains(query)
    }
}

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("ur", "Urdu"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("cs", "Czech"),
    ("sk", "Slovak"),
    ("hu", "Hungarian"),
    ("ro", "Romanian"),
    ("bg", "Bulgarian"),
    ("hr", "Croatian"),
    ("sr", "Serbian"),
    ("sl", "Slovenian"),
    ("et", "Estonian"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("mt", "Maltese"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("fa", "Persian"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("tl", "Filipino"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("mr", "Marathi"),
    ("or", "Odia"),
    ("as", "Assamese"),
    ("ne", "Nepali"),
    ("si", "Sinhala"),
    ("my", "Burmese"),
    ("km", "Khmer"),
    ("lo", "Lao"),
    ("ka", "Georgian"),
    ("am", "Amharic"),
    ("sw", "Swahili"),
    ("yo", "Yoruba"),
    ("ig", "Igbo"),
    ("ha", "Hausa"),
    ("zu", "Zulu"),
    ("xh", "Xhosa"),
    ("af", "Afrikaans"),
    ("is", "Icelandic"),
    ("ga", "Irish"),
    ("cy", "Welsh"),
    ("eu", "Basque"),
    ("ca", "Catalan"),
    ("gl", "Galician"),
    ("uk", "Ukrainian"),
    ("be", "Belarusian"),
    ("mk", "Macedonian"),
    ("sq", "Albanian"),
    ("bs", "Bosnian"),
    ("me", "Montenegrin"),
    ("mn", "Mongolian"),
    ("ky", "Kyrgyz"),
    ("kk", "Kazakh"),
    ("uz", "Uzbek"),
    ("tg", "Tajik"),
    ("tk", "Turkmen"),
    ("az", "Azerbaijani"),
    ("hy", "Armenian"),
    ("ab", "Abkhaz"),
    ("os", "Ossetian"),
    ("ce", "Chechen"),
    ("cv", "Chuvash"),
    ("tt", "Tatar"),
    ("ba", "Bashkir"),
    ("sah", "Yakut"),
    ("udm", "Udmurt"),
    ("mhr", "Mari"),
    ("myv", "Erzya"),
    ("ady", "Adyghe"),
    ("kbd", "Kabardian"),
    ("lez", "Lezgian"),
    ("tab", "Tabasaran"),
    ("ava", "Avar"),
    ("dar", "Dargwa"),
    ("lbe", "Lak"),
    ("rut", "Rutul"),
    ("agx", "Aghul"),
    ("tkr", "Tsakhur"),
    ("inh", "Ingush"),
    ("kum", "Kumyk"),
    ("nog", "Nogai"),
];

/// Immutable, ordered set of languages
#[derive(Debug, Clone)]
pub struct Catalog {
    languages: Vec<Language>,
    // code -> position in `languages`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered list of languages
    ///
    /// Codes are lower-cased. Every code must be a syntactically valid
    /// language identifier and must appear only once.
    ///
    /// # Errors
    /// - `CatalogError` for an empty, malformed or duplicate code
    pub fn new(languages: Vec<Language>) -> SheetResult<Self> {
        let mut normalized = Vec::with_capacity(languages.len());
        let mut index = HashMap::with_capacity(languages.len());

        for language in languages {
            let code = language.code.trim().to_lowercase();
            if code.is_empty() {
                return Err(SheetError::CatalogError(format!(
                    "Language '{}' has an empty code",
                    language.name
                )));
            }
            code.parse::<LanguageIdentifier>().map_err(|e| {
                SheetError::CatalogError(format!("Invalid language code '{}': {}", code, e))
            })?;
            if index.contains_key(&code) {
                return Err(SheetError::CatalogError(format!(
                    "Duplicate language code '{}'",
                    code
                )));
            }
            index.insert(code.clone(), normalized.len());
            normalized.push(Language {
                code,
                name: language.name,
            });
        }

        Ok(Catalog {
            languages: normalized,
            index,
        })
    }

    /// The catalog shipped with the tool
    pub fn builtin() -> Self {
        let languages: Vec<Language> = BUILTIN_LANGUAGES
            .iter()
            .map(|(code, name)| Language::new(code, name))
            .collect();
        let index = languages
            .iter()
            .enumerate()
            .map(|(i, language)| (language.code.clone(), i))
            .collect();
        Catalog { languages, index }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.index.get(code).map(|&i| &self.languages[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Languages whose name or code contains `query`, ignoring case
    ///
    /// The query is trimmed first. An empty query matches every language.
    /// Catalog order is preserved.
    pub fn filter(&self, query: &str) -> Vec<Language> {
        let query = query.trim().to_lowercase();
        self.languages
            .iter()
            .filter(|language| language.matches(&query))
            .cloned()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.languages().to_vec()).expect("builtin must validate");
        assert_eq!(rebuilt.len(), builtin.len());
        assert_eq!(builtin.len(), 107);
        assert_eq!(builtin.languages()[0], Language::new("en", "English"));
    }

    #[test]
    fn test_lookup_by_code() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("sah").map(|l| l.name.as_str()), Some("Yakut"));
        assert!(catalog.contains("fr"));
        assert!(!catalog.contains("xx-unknown"));
    }

    #[test]
    fn test_filter_empty_query_keeps_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter(""), catalog.languages().to_vec());
        assert_eq!(catalog.filter("   "), catalog.languages().to_vec());
    }

    #[test]
    fn test_filter_matches_name_and_code() {
        let catalog = Catalog::new(vec![
            Language::new("en", "English"),
            Language::new("es", "Spanish"),
            Language::new("de", "German"),
        ])
        .unwrap();

        let by_name: Vec<String> = catalog.filter("SPAN").into_iter().map(|l| l.code).collect();
        assert_eq!(by_name, vec!["es"]);

        // "e" hits every code or name, in catalog order
        let by_code: Vec<String> = catalog.filter("e").into_iter().map(|l| l.code).collect();
        assert_eq!(by_code, vec!["en", "es", "de"]);

        assert!(catalog.filter("klingon").is_empty());
    }

    #[test]
    fn test_new_lowercases_codes() {
        let catalog = Catalog::new(vec![Language::new("PT", "Portuguese")]).unwrap();
        assert!(catalog.contains("pt"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = Catalog::new(vec![
            Language::new("en", "English"),
            Language::new("EN", "English (again)"),
        ]);
        assert!(matches!(result, Err(SheetError::CatalogError(msg)) if msg.contains("Duplicate")));
    }

    #[test]
    fn test_new_rejects_malformed_codes() {
        assert!(Catalog::new(vec![Language::new("", "Nothing")]).is_err());
        assert!(Catalog::new(vec![Language::new("en@us", "Broken")]).is_err());
    }
}

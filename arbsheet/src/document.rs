use crate::error::SheetResult;
use serde_json::{Map, Value};

/// Key to string mapping for one language, in first-insertion order
///
/// Serializes as a flat JSON object, the shape of an ARB resource without
/// `@` metadata entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDocument(Map<String, Value>);

impl ResourceDocument {
    pub fn new() -> Self {
        ResourceDocument(Map::new())
    }

    /// Insert or overwrite a message. An overwritten key keeps the position
    /// of its first insertion. Returns the previous value, if any.
    pub fn insert(&mut self, key: &str, message: &str) -> Option<String> {
        self.0
            .insert(key.to_owned(), Value::String(message.to_owned()))
            .and_then(|previous| match previous {
                Value::String(s) => Some(s),
                _ => None,
            })
    }

    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.insert(key, message);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }

    /// Serialize as a JSON object indented with two spaces, no trailing newline
    pub fn to_arb_string(&self) -> SheetResult<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ResourceDocument {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut document = ResourceDocument::new();
        for (key, message) in iter {
            document.insert(key, message);
        }
        document
    }
}

//! FILENAME: core/element-engine/src/translation.rs
//! PURPOSE: Translation collaborator used for element display labels.

use rustc_hash::FxHashMap;

use crate::element::ReportElement;

/// Translates a display string in the context of its owning element.
pub trait Translator {
    fn translate_element(&self, element: &ReportElement, text: &str) -> String;
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate_element(&self, _element: &ReportElement, text: &str) -> String {
        text.to_string()
    }
}

/// Exact-match dictionary; unknown text is returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct DictionaryTranslator {
    entries: FxHashMap<String, String>,
}

impl DictionaryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, text: impl Into<String>, translated: impl Into<String>) -> Self {
        self.entries.insert(text.into(), translated.into());
        self
    }
}

impl Translator for DictionaryTranslator {
    fn translate_element(&self, _element: &ReportElement, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#![forbid(unsafe_code)]

//! Per-language string tables.

use std::collections::{BTreeMap, HashMap};

/// Language code → key → translated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    strings: BTreeMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a language table.
    #[must_use]
    pub fn with_language<K, V>(
        mut self,
        lang: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.strings.entry(lang.into()).or_default();
        table.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Insert one string.
    pub fn insert(&mut self, lang: impl Into<String>, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .entry(lang.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// True when a table exists for `lang`.
    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.strings.contains_key(lang)
    }

    /// Languages present, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Raw lookup without fallback.
    #[must_use]
    pub fn get(&self, lang: &str, key: &str) -> Option<&str> {
        self.strings.get(lang)?.get(key).map(String::as_str)
    }

    /// Lookup that falls back to `key` itself when the string is missing or
    /// empty.
    #[must_use]
    pub fn lookup<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        match self.get(lang, key) {
            Some(value) if !value.is_empty() => value,
            _ => key,
        }
    }
}

/// Where a translated string goes on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    /// The element's text content.
    Text,
    /// The `placeholder` attribute of an input or textarea.
    Placeholder,
}

impl BindingTarget {
    /// Inputs and textareas receive placeholders; everything else text.
    #[must_use]
    pub fn for_tag(tag_name: &str) -> Self {
        if tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea") {
            Self::Placeholder
        } else {
            Self::Text
        }
    }
}

/// An element bound to a catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Catalog key.
    pub key: String,
    /// Where the string goes.
    pub target: BindingTarget,
}

impl Binding {
    /// Bind `key` for an element with the given tag name.
    #[must_use]
    pub fn new(key: impl Into<String>, tag_name: &str) -> Self {
        Self {
            key: key.into(),
            target: BindingTarget::for_tag(tag_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_language("es", [("submitLabel", "Enviar"), ("empty", "")])
            .with_language("en", [("submitLabel", "Send")])
    }

    #[test]
    fn lookup_falls_back_to_key() {
        let c = catalog();
        assert_eq!(c.lookup("es", "submitLabel"), "Enviar");
        assert_eq!(c.lookup("en", "submitLabel"), "Send");
        assert_eq!(c.lookup("en", "missing"), "missing");
        assert_eq!(c.lookup("es", "empty"), "empty");
        assert_eq!(c.lookup("fr", "submitLabel"), "submitLabel");
    }

    #[test]
    fn languages_are_sorted() {
        let mut c = catalog();
        c.insert("de", "submitLabel", "Senden");
        assert_eq!(c.languages().collect::<Vec<_>>(), vec!["de", "en", "es"]);
        assert!(c.has_language("de"));
        assert_eq!(c.get("es", "empty"), Some(""));
    }

    #[test]
    fn binding_target_follows_tag() {
        assert_eq!(Binding::new("k", "INPUT").target, BindingTarget::Placeholder);
        assert_eq!(Binding::new("k", "textarea").target, BindingTarget::Placeholder);
        assert_eq!(Binding::new("k", "h2").target, BindingTarget::Text);
    }
}

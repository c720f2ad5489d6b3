#![forbid(unsafe_code)]

//! Language context: the current language, its persisted preference, and
//! change notification.
//!
//! # Invariants
//!
//! 1. The current language is always either the construction default or a
//!    language present in the catalog.
//! 2. Listeners run in registration order, after the language and the stored
//!    preference have been updated.
//!
//! # Failure Modes
//!
//! | Scenario                        | Behavior                              |
//! |---------------------------------|---------------------------------------|
//! | Unknown language requested      | No-op, listeners not called           |
//! | Saved language not in catalog   | Ignored, default kept                 |
//! | Store write fails               | Logged at warn, language still switches |

use std::fmt;
use std::sync::Arc;

use scrolly_core::storage::KeyValueStore;

use crate::catalog::{Binding, Catalog};

/// Language used when nothing else is known.
pub const DEFAULT_LANG: &str = "es";

/// Storage key holding the visitor's language choice.
pub const LANG_STORAGE_KEY: &str = "site:lang";

/// Handle returned by [`I18n::on_language_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&str)>;

/// Current language plus the catalog it reads from.
pub struct I18n {
    catalog: Catalog,
    current: String,
    store: Arc<dyn KeyValueStore>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl I18n {
    /// Create a context starting in [`DEFAULT_LANG`], or in the saved
    /// language when the store has one the catalog knows.
    #[must_use]
    pub fn new(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_default(catalog, store, DEFAULT_LANG)
    }

    /// Like [`I18n::new`] with an explicit fallback language.
    #[must_use]
    pub fn with_default(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        default_lang: impl Into<String>,
    ) -> Self {
        let mut current = default_lang.into();
        match store.get(LANG_STORAGE_KEY) {
            Ok(Some(saved)) if catalog.has_language(&saved) => current = saved,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, store = store.name(), "failed to read saved language");
            }
        }
        Self {
            catalog,
            current,
            store,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current language code.
    #[inline]
    #[must_use]
    pub fn current_lang(&self) -> &str {
        &self.current
    }

    /// The catalog.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Translate `key` in the current language, falling back to `key`.
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.lookup(&self.current, key)
    }

    /// Translation for a bound element, if the current language has one.
    ///
    /// Unlike [`I18n::t`] there is no key fallback: elements without a
    /// string keep their existing content. An empty string is applied.
    #[must_use]
    pub fn translate_binding(&self, binding: &Binding) -> Option<&str> {
        self.catalog.get(&self.current, &binding.key)
    }

    /// Switch to `lang`, persist the choice and notify listeners.
    ///
    /// Returns `false` (and does nothing) when the catalog has no table for
    /// `lang`. Re-applying the current language still notifies.
    pub fn apply_language(&mut self, lang: &str) -> bool {
        if !self.catalog.has_language(lang) {
            tracing::trace!(lang, "unknown language ignored");
            return false;
        }
        if self.current != lang {
            self.current.clear();
            self.current.push_str(lang);
        }
        if let Err(err) = self.store.set(LANG_STORAGE_KEY, lang) {
            tracing::warn!(error = %err, store = self.store.name(), "failed to persist language");
        }
        tracing::debug!(lang, listeners = self.listeners.len(), "language applied");
        for (_, listener) in &mut self.listeners {
            listener(&self.current);
        }
        true
    }

    /// Flip between `es` and `en`.
    pub fn toggle(&mut self) -> bool {
        let next = if self.current == "es" { "en" } else { "es" };
        self.apply_language(next)
    }

    /// Register a callback run with the new language code on every
    /// successful [`I18n::apply_language`].
    pub fn on_language_change(&mut self, listener: impl FnMut(&str) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("current", &self.current)
            .field("languages", &self.catalog.languages().collect::<Vec<_>>())
            .field("store", &self.store.name())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scrolly_core::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_language(
                "es",
                [
                    ("submitLabel", "Enviar"),
                    ("namePlaceholder", "Tu nombre"),
                    ("blank", ""),
                ],
            )
            .with_language("en", [("submitLabel", "Send")])
    }

    fn memory() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn defaults_to_spanish() {
        let i18n = I18n::new(catalog(), memory());
        assert_eq!(i18n.current_lang(), "es");
        assert_eq!(i18n.t("submitLabel"), "Enviar");
        assert_eq!(i18n.t("nope"), "nope");
        assert_eq!(i18n.t("blank"), "blank");
    }

    #[test]
    fn restores_saved_language() {
        let store = Arc::new(MemoryStore::with_entries([(LANG_STORAGE_KEY, "en")]));
        let i18n = I18n::new(catalog(), store);
        assert_eq!(i18n.current_lang(), "en");
        assert_eq!(i18n.t("submitLabel"), "Send");
    }

    #[test]
    fn ignores_saved_language_missing_from_catalog() {
        let store = Arc::new(MemoryStore::with_entries([(LANG_STORAGE_KEY, "fr")]));
        let i18n = I18n::new(catalog(), store);
        assert_eq!(i18n.current_lang(), "es");
    }

    #[test]
    fn apply_language_persists_and_notifies() {
        let store = memory();
        let mut i18n = I18n::new(catalog(), store.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        i18n.on_language_change(move |lang| sink.borrow_mut().push(lang.to_string()));

        assert!(i18n.apply_language("en"));
        assert_eq!(store.get(LANG_STORAGE_KEY).unwrap().as_deref(), Some("en"));
        assert!(!i18n.apply_language("fr"));
        assert_eq!(i18n.current_lang(), "en");
        assert_eq!(*seen.borrow(), vec!["en"]);
    }

    #[test]
    fn toggle_flips_between_es_and_en() {
        let mut i18n = I18n::new(catalog(), memory());
        i18n.toggle();
        assert_eq!(i18n.current_lang(), "en");
        i18n.toggle();
        assert_eq!(i18n.current_lang(), "es");
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut i18n = I18n::new(catalog(), memory());
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = i18n.on_language_change(move |_| *c.borrow_mut() += 1);
        i18n.toggle();
        assert!(i18n.remove_listener(id));
        assert!(!i18n.remove_listener(id));
        i18n.toggle();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(i18n.listener_count(), 0);
    }

    #[test]
    fn bindings_have_no_key_fallback() {
        let mut i18n = I18n::new(catalog(), memory());
        let placeholder = Binding::new("namePlaceholder", "input");
        assert_eq!(i18n.translate_binding(&placeholder), Some("Tu nombre"));
        assert_eq!(i18n.translate_binding(&Binding::new("blank", "p")), Some(""));
        i18n.apply_language("en");
        assert_eq!(i18n.translate_binding(&placeholder), None);
    }

    proptest! {
        #[test]
        fn current_language_is_always_known(langs in proptest::collection::vec("[a-z]{2}", 0..16)) {
            let mut i18n = I18n::new(catalog(), memory());
            for lang in &langs {
                i18n.apply_language(lang);
                prop_assert!(i18n.catalog().has_language(i18n.current_lang()));
            }
        }
    }
}

//! Error-message translations.
//!
//! Messages are stored per locale and field name. Lookups in the current
//! locale fall back to the [`DEFAULT_LOCALE`], which is where messages given
//! at input registration end up.

use std::collections::HashMap;

/// Locale that holds the messages given at registration.
pub const DEFAULT_LOCALE: &str = "default";

/// `locale -> field name -> message`, the shape accepted by
/// [`Translations::merge`] and deserialized from configuration.
pub type TranslationMap = HashMap<String, HashMap<String, String>>;

/// Per-locale error messages with a current locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    locale: String,
    messages: TranslationMap,
}

impl Translations {
    /// Empty translations, with [`DEFAULT_LOCALE`] current.
    #[must_use]
    pub fn new() -> Self {
        Self::with_locale(DEFAULT_LOCALE)
    }

    /// Empty translations with `locale` current.
    pub fn with_locale(locale: impl Into<String>) -> Self {
        let mut translations = Self {
            locale: DEFAULT_LOCALE.to_owned(),
            messages: HashMap::new(),
        };
        translations.messages.entry(DEFAULT_LOCALE.to_owned()).or_default();
        translations.set_locale(locale);
        translations
    }

    /// The current locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Switches the current locale, creating an empty table for it if needed.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.messages.entry(locale.clone()).or_default();
        tracing::debug!(%locale, "locale changed");
        self.locale = locale;
    }

    /// Sets or clears the default-locale message for `name`.
    pub fn set_default_message(&mut self, name: &str, message: Option<String>) {
        let table = self.messages.entry(DEFAULT_LOCALE.to_owned()).or_default();
        match message {
            Some(message) => {
                table.insert(name.to_owned(), message);
            }
            None => {
                table.remove(name);
            }
        }
    }

    /// Merges `translations` into the stored tables.
    ///
    /// Messages for the same locale and name are overwritten; everything else
    /// is kept.
    pub fn merge(&mut self, translations: TranslationMap) {
        for (locale, table) in translations {
            self.messages.entry(locale).or_default().extend(table);
        }
    }

    /// The message for `name` in the current locale, falling back to the
    /// default locale. Empty messages count as absent.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&str> {
        self.lookup(&self.locale, name)
            .or_else(|| self.lookup(DEFAULT_LOCALE, name))
    }

    fn lookup(&self, locale: &str, name: &str) -> Option<&str> {
        self.messages
            .get(locale)
            .and_then(|table| table.get(name))
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new()
    }
}

//! Form configuration.
//!
//! Everything here can be deserialized from JSON; callbacks are attached in
//! code afterwards.
//!
//! ```json
//! {
//!   "settings": { "locale": "fr", "callback_on_mass_validate": false },
//!   "inputs": {
//!     "email": { "constraint": ["required", "email"], "filter": "trim lowercase",
//!                "error_message": "Enter a valid email" }
//!   },
//!   "translations": { "fr": { "email": "Courriel invalide" } }
//! }
//! ```

use greenlight_rules::Constraint;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormResult;
use crate::filter::FilterChain;
use crate::i18n::{DEFAULT_LOCALE, TranslationMap};
use crate::validator::InputSpec;

/// Validator-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Run callbacks when a single field is validated, unless overridden per call.
    pub callback_on_validate: bool,
    /// Run callbacks when many fields are validated at once, unless overridden.
    pub callback_on_mass_validate: bool,
    /// Locale used for error messages.
    pub locale: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            callback_on_validate: true,
            callback_on_mass_validate: true,
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }
}

impl FormSettings {
    /// Parses settings from a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One input as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON-encoded constraint, see [`Constraint::from_json`]. `null` or
    /// missing means the input always passes.
    pub constraint: Value,
    /// Filter names separated by commas or whitespace.
    pub filter: Option<String>,
    /// Message for the default locale.
    pub error_message: Option<String>,
}

impl InputConfig {
    /// Converts the configuration into an [`InputSpec`].
    pub fn into_spec(self) -> FormResult<InputSpec> {
        let mut spec = InputSpec::new();
        if !self.constraint.is_null() {
            spec = spec.constraint(Constraint::from_json(&self.constraint)?);
        }
        if let Some(filter) = self.filter {
            spec = spec.filter(FilterChain::parse(&filter)?);
        }
        if let Some(message) = self.error_message {
            spec = spec.error_message(message);
        }
        Ok(spec)
    }
}

/// A whole form: settings, inputs in registration order, and translations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Validator-wide settings.
    pub settings: FormSettings,
    /// Inputs, registered in order.
    pub inputs: IndexMap<String, InputConfig>,
    /// Extra translations merged after registration.
    pub translations: TranslationMap,
}

impl FormConfig {
    /// Parses a form configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

//! # greenlight-form
//!
//! Headless form validation built on [`greenlight_rules`].
//!
//! A [`FormValidator`] registers inputs with a constraint, an optional value
//! [`FilterChain`], an error message and callbacks, then validates them
//! against [`Form`](greenlight_rules::Form) snapshots. Messages are looked up
//! through [`Translations`] in the current locale.
//!
//! ```
//! use greenlight_form::{FormConfig, FormValidator, error_messages};
//! use greenlight_rules::{Engine, Field, Form};
//!
//! let config = FormConfig::from_json_str(r#"{
//!     "inputs": {
//!         "name":  { "constraint": "required", "error_message": "Name is required" },
//!         "email": { "constraint": ["required", "email"], "filter": "trim",
//!                    "error_message": "Email is invalid" }
//!     }
//! }"#).unwrap();
//! let validator = FormValidator::from_config("signup", &Engine::new(), config).unwrap();
//!
//! let form = Form::new()
//!     .with_field("name", Field::text(""))
//!     .with_field("email", Field::text("alice@example.com"));
//! let submitted = validator.submit(&form).unwrap();
//!
//! assert!(!submitted.proceed);
//! assert_eq!(error_messages(&submitted.results), vec!["Name is required"]);
//! ```

mod error;
mod filter;
mod i18n;
mod results;
mod settings;
mod validator;

pub use error::{FilterError, FormError, FormResult};
pub use filter::{Filter, FilterChain};
pub use i18n::{DEFAULT_LOCALE, TranslationMap, Translations};
pub use results::{ValidationOutcome, all_passed, error_messages, failed_names};
pub use settings::{FormConfig, FormSettings, InputConfig};
pub use validator::{Callbacks, FormValidator, InputSpec, SubmitOutcome, ValidateManyOptions};

//! Per-form validation orchestration.
//!
//! A [`FormValidator`] remembers, for each registered input, its resolved
//! predicate, its value filter, its callbacks and its error message. The form
//! values themselves are not stored: every call takes the current [`Form`]
//! snapshot.
//!
//! When an input is validated, its predicate sees the field with the
//! *filtered* value, while sibling lookups through the
//! [`EvalContext`] see the raw form.
//!
//! # Examples
//!
//! ```
//! use greenlight_form::{FormSettings, FormValidator, InputSpec, FilterChain};
//! use greenlight_rules::{Engine, Field, Form};
//!
//! let engine = Engine::new();
//! let mut validator = FormValidator::new("signup", FormSettings::default()).unwrap();
//! validator
//!     .register_input(
//!         &engine,
//!         "email",
//!         InputSpec::new()
//!             .constraint(["required", "email"])
//!             .filter(FilterChain::parse("trim").unwrap())
//!             .error_message("Enter a valid email"),
//!     )
//!     .unwrap();
//!
//! let form = Form::new().with_field("email", Field::text("  alice@example.com "));
//! assert!(validator.validate(&form, "email", None).unwrap().success);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use greenlight_rules::{Constraint, Engine, EvalContext, Field, Form, Predicate, Subject};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{FormError, FormResult};
use crate::filter::FilterChain;
use crate::i18n::{TranslationMap, Translations};
use crate::results::{ValidationOutcome, all_passed};
use crate::settings::{FormConfig, FormSettings};

type CallbackFn = dyn Fn(&ValidationOutcome, &Field) + Send + Sync;
type SubmitFn = dyn Fn(&[ValidationOutcome]) -> bool + Send + Sync;

// ============================================================================
// CALLBACKS
// ============================================================================

/// Success and failure callbacks for a validated field.
///
/// Each receives the outcome and the raw field.
#[derive(Clone, Default)]
pub struct Callbacks {
    on_success: Option<Arc<CallbackFn>>,
    on_fail: Option<Arc<CallbackFn>>,
}

impl Callbacks {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the success callback.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationOutcome, &Field) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Sets the failure callback.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_fail<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationOutcome, &Field) + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(f));
        self
    }

    fn pick(&self, success: bool) -> Option<&Arc<CallbackFn>> {
        if success {
            self.on_success.as_ref()
        } else {
            self.on_fail.as_ref()
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .finish()
    }
}

// ============================================================================
// INPUT SPEC
// ============================================================================

/// How to validate one input, before registration.
#[derive(Debug, Clone, Default)]
pub struct InputSpec {
    constraint: Option<Constraint>,
    filter: FilterChain,
    error_message: Option<String>,
    callbacks: Callbacks,
}

impl InputSpec {
    /// An input that always passes, with no filter, message or callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// Sets the value filter.
    #[must_use = "builder methods must be chained or built"]
    pub fn filter(mut self, filter: impl Into<FilterChain>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the default-locale error message.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Sets the input's own callbacks, which take precedence over the
    /// validator's defaults.
    #[must_use = "builder methods must be chained or built"]
    pub fn callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

struct RegisteredInput {
    predicate: Predicate,
    filter: FilterChain,
    callbacks: Callbacks,
}

// ============================================================================
// OPTIONS & SUBMISSION
// ============================================================================

/// Options for [`FormValidator::validate_many`].
#[derive(Debug, Clone, Default)]
pub struct ValidateManyOptions {
    /// Run callbacks; defaults to the `callback_on_mass_validate` setting.
    pub do_callback: Option<bool>,
    /// Only validate these names (unregistered ones are skipped).
    pub names: Option<Vec<String>>,
    /// Only validate fields whose raw value satisfies this predicate.
    pub constraint: Option<Predicate>,
}

/// The result of [`FormValidator::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Outcome of every registered field.
    pub results: Vec<ValidationOutcome>,
    /// What the submit handler decided: `true` lets the submission proceed.
    pub proceed: bool,
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates the registered inputs of one form.
pub struct FormValidator {
    form_id: String,
    settings: FormSettings,
    inputs: IndexMap<String, RegisteredInput>,
    translations: Translations,
    default_callbacks: Callbacks,
    on_submit_success: Arc<SubmitFn>,
    on_submit_fail: Arc<SubmitFn>,
}

impl FormValidator {
    /// Creates a validator for the form identified by `form_id`.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingFormId`] if `form_id` is empty.
    pub fn new(form_id: impl Into<String>, settings: FormSettings) -> FormResult<Self> {
        let form_id = form_id.into();
        if form_id.is_empty() {
            return Err(FormError::MissingFormId);
        }
        let translations = Translations::with_locale(settings.locale.clone());
        Ok(Self {
            form_id,
            settings,
            inputs: IndexMap::new(),
            translations,
            default_callbacks: Callbacks::default(),
            on_submit_success: Arc::new(|_: &[ValidationOutcome]| true),
            on_submit_fail: Arc::new(|_: &[ValidationOutcome]| false),
        })
    }

    /// Creates a validator and registers everything in `config`.
    pub fn from_config(
        form_id: impl Into<String>,
        engine: &Engine,
        config: FormConfig,
    ) -> FormResult<Self> {
        let mut validator = Self::new(form_id, config.settings)?;
        for (name, input) in config.inputs {
            validator.register_input(engine, name, input.into_spec()?)?;
        }
        validator.set_translations(config.translations);
        Ok(validator)
    }

    /// The form id given at construction.
    #[must_use]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// The current settings.
    #[must_use]
    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// The current locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.translations.locale()
    }

    /// Registered input names, in registration order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Registers (or re-registers) the input `name`.
    ///
    /// The constraint is resolved against `engine` now; an input without a
    /// constraint always passes. The input's error message becomes the
    /// default-locale message for `name`.
    pub fn register_input(
        &mut self,
        engine: &Engine,
        name: impl Into<String>,
        spec: InputSpec,
    ) -> FormResult<()> {
        let name = name.into();
        let predicate = match spec.constraint {
            Some(constraint) => engine.to_predicate(constraint)?,
            None => Predicate::always(),
        };
        self.translations
            .set_default_message(&name, spec.error_message);
        tracing::debug!(
            form = %self.form_id,
            input = %name,
            filters = spec.filter.len(),
            "registered input"
        );
        self.inputs.insert(
            name,
            RegisteredInput {
                predicate,
                filter: spec.filter,
                callbacks: spec.callbacks,
            },
        );
        Ok(())
    }

    /// Registers several inputs in order, stopping at the first failure.
    pub fn register_inputs<I, N>(&mut self, engine: &Engine, inputs: I) -> FormResult<()>
    where
        I: IntoIterator<Item = (N, InputSpec)>,
        N: Into<String>,
    {
        for (name, spec) in inputs {
            self.register_input(engine, name, spec)?;
        }
        Ok(())
    }

    /// Switches the message locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.settings.locale.clone_from(&locale);
        self.translations.set_locale(locale);
    }

    /// Merges translations, `locale -> field name -> message`.
    pub fn set_translations(&mut self, translations: TranslationMap) {
        self.translations.merge(translations);
    }

    /// Sets the callbacks used by inputs that have none of their own.
    pub fn set_default_callbacks(&mut self, callbacks: Callbacks) {
        self.default_callbacks = callbacks;
    }

    /// Sets the handlers [`submit`](Self::submit) calls with the results.
    ///
    /// Each returns whether the submission should proceed. The defaults
    /// return `true` on success and `false` on failure.
    pub fn set_submit_handlers<S, F>(&mut self, on_success: S, on_fail: F)
    where
        S: Fn(&[ValidationOutcome]) -> bool + Send + Sync + 'static,
        F: Fn(&[ValidationOutcome]) -> bool + Send + Sync + 'static,
    {
        self.on_submit_success = Arc::new(on_success);
        self.on_submit_fail = Arc::new(on_fail);
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Names of registered inputs present in `form`, optionally only those
    /// whose raw field satisfies `constraint`, in registration order.
    #[must_use]
    pub fn query(&self, form: &Form, constraint: Option<&Predicate>) -> Vec<String> {
        self.select(form, self.input_names(), constraint)
    }

    fn select<'n>(
        &self,
        form: &Form,
        names: impl Iterator<Item = &'n str>,
        constraint: Option<&Predicate>,
    ) -> Vec<String> {
        let cx = EvalContext::with_siblings(form);
        names
            .filter(|name| self.is_registered(name))
            .filter(|name| {
                form.get(name).is_some_and(|field| {
                    constraint.is_none_or(|predicate| predicate.test(field, &cx))
                })
            })
            .map(str::to_owned)
            .collect()
    }

    /// Validates the input `name` against `form`.
    ///
    /// Callbacks run when `exec_callback` (defaulting to the
    /// `callback_on_validate` setting) is set: the input's own callback if it
    /// has one, the default otherwise.
    ///
    /// # Errors
    ///
    /// [`FormError::Unregistered`] if `name` was never registered;
    /// [`FormError::FieldMissing`] if `form` has no field `name`.
    pub fn validate(
        &self,
        form: &Form,
        name: &str,
        exec_callback: Option<bool>,
    ) -> FormResult<ValidationOutcome> {
        let Some(input) = self.inputs.get(name) else {
            tracing::warn!(form = %self.form_id, input = name, "validating unregistered input");
            return Err(FormError::unregistered(name));
        };
        let Some(field) = form.get(name) else {
            tracing::warn!(form = %self.form_id, input = name, "input missing from form");
            return Err(FormError::field_missing(name));
        };

        let filtered = Filtered {
            field,
            value: input.filter.apply(&field.text()),
        };
        let cx = EvalContext::with_siblings(form);
        let success = input.predicate.test(&filtered, &cx);

        let outcome = ValidationOutcome {
            name: name.to_owned(),
            success,
            error_message: self.translations.message(name).map(str::to_owned),
        };
        tracing::trace!(form = %self.form_id, input = name, success, "validated input");

        if exec_callback.unwrap_or(self.settings.callback_on_validate) {
            let callback = input
                .callbacks
                .pick(success)
                .or_else(|| self.default_callbacks.pick(success));
            if let Some(callback) = callback {
                callback(&outcome, field);
            }
        }

        Ok(outcome)
    }

    /// Validates every registered input, in registration order.
    pub fn validate_all(&self, form: &Form) -> FormResult<Vec<ValidationOutcome>> {
        self.validate_many(form, &ValidateManyOptions::default())
    }

    /// Validates a subset of the registered inputs.
    ///
    /// With neither `names` nor `constraint` set, every registered input is
    /// validated and a registered input missing from `form` is an error.
    /// Otherwise only registered inputs present in `form` that match are
    /// validated.
    pub fn validate_many(
        &self,
        form: &Form,
        options: &ValidateManyOptions,
    ) -> FormResult<Vec<ValidationOutcome>> {
        let do_callback = options
            .do_callback
            .unwrap_or(self.settings.callback_on_mass_validate);

        let names: Vec<String> = match (&options.names, &options.constraint) {
            (None, None) => self.input_names().map(str::to_owned).collect(),
            (Some(names), constraint) => {
                self.select(form, names.iter().map(String::as_str), constraint.as_ref())
            }
            (None, Some(constraint)) => self.query(form, Some(constraint)),
        };

        names
            .iter()
            .map(|name| self.validate(form, name, Some(do_callback)))
            .collect()
    }

    /// Validates every registered input and asks the submit handlers whether
    /// to proceed.
    pub fn submit(&self, form: &Form) -> FormResult<SubmitOutcome> {
        let results = self.validate_all(form)?;
        let proceed = if all_passed(&results) {
            (self.on_submit_success)(&results)
        } else {
            (self.on_submit_fail)(&results)
        };
        tracing::debug!(form = %self.form_id, proceed, fields = results.len(), "form submitted");
        Ok(SubmitOutcome { results, proceed })
    }
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("form_id", &self.form_id)
            .field("settings", &self.settings)
            .field("inputs", &self.inputs.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FILTERED SUBJECT
// ============================================================================

/// A field seen through its input's filter.
struct Filtered<'a> {
    field: &'a Field,
    value: String,
}

impl Subject for Filtered<'_> {
    fn value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.value.as_str()))
    }

    fn checked(&self) -> Option<bool> {
        self.field.checked()
    }

    fn disabled(&self) -> bool {
        self.field.disabled()
    }

    fn kind(&self) -> Option<&str> {
        self.field.kind()
    }

    fn selected_index(&self) -> Option<usize> {
        self.field.selected_index()
    }

    fn selected_value(&self) -> Option<Cow<'_, str>> {
        self.field.selected_value()
    }

    fn property(&self, name: &str) -> Option<Value> {
        if name == "value" {
            Some(Value::String(self.value.clone()))
        } else {
            self.field.property(name)
        }
    }
}

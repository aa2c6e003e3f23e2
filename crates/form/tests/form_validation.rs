//! End-to-end tests for form validation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use greenlight_form::{
    Callbacks, FormConfig, FormError, FormSettings, FormValidator, InputSpec, ValidateManyOptions,
    error_messages,
};
use greenlight_rules::combinators::{length, matches, require};
use greenlight_rules::{Engine, Field, Form, Predicate};
use pretty_assertions::assert_eq;

fn signup(engine: &Engine) -> FormValidator {
    let config = FormConfig::from_json_str(
        r#"{
            "settings": { "callback_on_mass_validate": true },
            "inputs": {
                "username": { "constraint": ["required", "alphanumeric"], "filter": "trim",
                              "error_message": "Pick a username" },
                "email":    { "constraint": ["required", "email"], "filter": "trim, lowercase",
                              "error_message": "Enter a valid email" },
                "country":  { "constraint": "required", "error_message": "Choose a country" }
            },
            "translations": {
                "fr": { "email": "Adresse invalide" }
            }
        }"#,
    )
    .unwrap();
    let mut validator = FormValidator::from_config("signup", engine, config).unwrap();
    validator
        .register_input(
            engine,
            "password",
            InputSpec::new()
                .constraint(length(8, None).unwrap())
                .error_message("Password too short"),
        )
        .unwrap();
    validator
        .register_input(
            engine,
            "confirm",
            InputSpec::new()
                .constraint(matches("password"))
                .error_message("Passwords differ"),
        )
        .unwrap();
    validator
}

fn filled() -> Form {
    Form::new()
        .with_field("username", Field::text(" alice_01 "))
        .with_field("email", Field::text(" Alice@Example.COM "))
        .with_field("country", Field::select(["", "FR", "US"], Some(1)))
        .with_field("password", Field::text("correct horse"))
        .with_field("confirm", Field::text("correct horse"))
}

#[test]
fn valid_form_submits() {
    let engine = Engine::new();
    let validator = signup(&engine);

    let submitted = validator.submit(&filled()).unwrap();

    assert!(submitted.proceed);
    let names: Vec<_> = submitted.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["username", "email", "country", "password", "confirm"]);
    assert!(submitted.results.iter().all(|r| r.success));
}

#[test]
fn invalid_form_reports_messages_in_order() {
    let engine = Engine::new();
    let validator = signup(&engine);

    let mut form = filled();
    form.set_value("email", "not-an-email");
    form.set_value("confirm", "correct horse!");
    form.get_mut("country").unwrap().select_index(Some(0));

    let submitted = validator.submit(&form).unwrap();

    assert!(!submitted.proceed);
    assert_eq!(
        error_messages(&submitted.results),
        vec!["Enter a valid email", "Choose a country", "Passwords differ"]
    );
}

#[test]
fn locale_switch_changes_messages() {
    let engine = Engine::new();
    let mut validator = signup(&engine);
    let mut form = filled();
    form.set_value("email", "nope");

    validator.set_locale("fr");
    let outcome = validator.validate(&form, "email", None).unwrap();
    assert_eq!(outcome.error_message.as_deref(), Some("Adresse invalide"));

    // No French message for username: falls back to the default locale.
    form.set_value("username", "");
    let outcome = validator.validate(&form, "username", None).unwrap();
    assert_eq!(outcome.error_message.as_deref(), Some("Pick a username"));

    validator.set_translations(HashMap::from([(
        "fr".to_owned(),
        HashMap::from([("username".to_owned(), "Choisissez un nom".to_owned())]),
    )]));
    let outcome = validator.validate(&form, "username", None).unwrap();
    assert_eq!(outcome.error_message.as_deref(), Some("Choisissez un nom"));
    assert_eq!(validator.locale(), "fr");
}

#[test]
fn validate_many_with_names_and_constraint() {
    let engine = Engine::new();
    let validator = signup(&engine);
    let mut form = filled();
    form.set_value("username", "");

    let only_named = validator
        .validate_many(
            &form,
            &ValidateManyOptions {
                names: Some(vec!["email".into(), "unknown".into(), "username".into()]),
                ..ValidateManyOptions::default()
            },
        )
        .unwrap();
    let names: Vec<_> = only_named.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["email", "username"]);

    let empty_only = validator
        .validate_many(
            &form,
            &ValidateManyOptions {
                constraint: Some(engine.to_predicate("empty").unwrap()),
                ..ValidateManyOptions::default()
            },
        )
        .unwrap();
    assert_eq!(empty_only.len(), 1);
    assert_eq!(empty_only[0].name, "username");
    assert!(!empty_only[0].success);
}

#[test]
fn query_lists_registered_present_fields() {
    let engine = Engine::new();
    let validator = signup(&engine);
    let form = Form::new()
        .with_field("username", Field::text("bob"))
        .with_field("email", Field::text(""))
        .with_field("unregistered", Field::text("x"));

    assert_eq!(validator.query(&form, None), vec!["username", "email"]);
    let required = engine.to_predicate("required").unwrap();
    assert_eq!(validator.query(&form, Some(&required)), vec!["username"]);
}

#[test]
fn validate_all_requires_every_field() {
    let engine = Engine::new();
    let validator = signup(&engine);
    let form = Form::new().with_field("username", Field::text("bob"));

    assert_eq!(
        validator.validate_all(&form).unwrap_err(),
        FormError::field_missing("email")
    );
}

#[test]
fn mass_validation_callbacks_follow_settings() {
    let engine = Engine::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let settings = FormSettings {
        callback_on_mass_validate: false,
        ..FormSettings::default()
    };
    let mut validator = FormValidator::new("profile", settings).unwrap();
    validator.set_default_callbacks(Callbacks::new().on_success(move |outcome, field| {
        sink.lock()
            .unwrap()
            .push(format!("{}={}", outcome.name, greenlight_rules::Subject::text(field)));
    }));
    validator
        .register_input(&engine, "nick", InputSpec::new().constraint("required"))
        .unwrap();
    let form = Form::new().with_field("nick", Field::text("zed"));

    validator.validate_all(&form).unwrap();
    assert!(seen.lock().unwrap().is_empty());

    validator
        .validate_many(
            &form,
            &ValidateManyOptions {
                do_callback: Some(true),
                ..ValidateManyOptions::default()
            },
        )
        .unwrap();
    validator.validate(&form, "nick", None).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["nick=zed", "nick=zed"]);
}

#[test]
fn submit_handlers_decide() {
    let engine = Engine::new();
    let mut validator = FormValidator::new("checkout", FormSettings::default()).unwrap();
    validator
        .register_inputs(
            &engine,
            [
                ("terms", InputSpec::new().constraint("checked")),
                (
                    "coupon",
                    InputSpec::new().constraint(
                        require(engine.registry(), "terms", Some("checked".into())).unwrap(),
                    ),
                ),
            ],
        )
        .unwrap();
    // Submit even on failure, as long as only the coupon failed.
    validator.set_submit_handlers(
        |_| true,
        |results| results.iter().all(|r| r.success || r.name == "coupon"),
    );

    let unticked = Form::new()
        .with_field("terms", Field::checkbox(false))
        .with_field("coupon", Field::text("SAVE10"));
    let submitted = validator.submit(&unticked).unwrap();
    assert!(!submitted.proceed);

    let ticked = Form::new()
        .with_field("terms", Field::checkbox(true))
        .with_field("coupon", Field::new());
    assert!(validator.submit(&ticked).unwrap().proceed);
}

#[test]
fn always_passing_input() {
    let engine = Engine::new();
    let mut validator = FormValidator::new("misc", FormSettings::default()).unwrap();
    validator
        .register_input(&engine, "notes", InputSpec::new().constraint(Predicate::always()))
        .unwrap();
    let form = Form::new().with_field("notes", Field::new());
    assert!(validator.validate(&form, "notes", None).unwrap().success);
}

//! Tests for environment-driven validator configuration
//!
//! Kept in its own test binary: it mutates the process environment.

use cnab_rust::validation::{SchemaDraft, SCHEMA_DRAFT_ENV};
use cnab_rust::{Bundle, Error, ParameterValidator, Validator, ValidatorOptions};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_options_from_env() {
    init_logging();

    std::env::remove_var(SCHEMA_DRAFT_ENV);
    assert_eq!(ValidatorOptions::from_env().unwrap().draft, SchemaDraft::Draft7);

    std::env::set_var(SCHEMA_DRAFT_ENV, "draft6");
    assert_eq!(ValidatorOptions::from_env().unwrap().draft, SchemaDraft::Draft6);

    std::env::set_var(SCHEMA_DRAFT_ENV, "draft99");
    let err = ValidatorOptions::from_env().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(
        err.context().and_then(|c| c.source.as_deref()),
        Some("validator_options")
    );

    std::env::set_var(SCHEMA_DRAFT_ENV, "4");
    let bundle = Bundle::from_yaml_str(
        r#"
name: env-bundle
schemaVersion: v1
version: 0.0.1
invocationImages: []
definitions:
  name: { type: string, maxLength: 3 }
parameters:
  name: { definition: name, destination: { env: NAME } }
"#,
    )
    .unwrap();
    let validator = Validator::with_options(&bundle, ValidatorOptions::from_env().unwrap());
    assert!(validator.validate_text("name", "abc").is_valid());
    assert!(!validator.validate_text("name", "abcd").is_valid());

    std::env::remove_var(SCHEMA_DRAFT_ENV);
}

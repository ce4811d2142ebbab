//! Parameter value validation.
//!
//! # Validation Layer
//!
//! A [`Validator`] answers "is this a good value for that parameter?" for one
//! bundle. It resolves the parameter to its schema through two lookups
//! (parameter → definition name → definition) and hands the schema and the
//! value to a [`SchemaEngine`]. Every outcome, including an unresolvable
//! parameter, comes back as a [`Validity`]; nothing here returns an error.
//!
//! Values that arrive as text (form fields, command-line flags) go through
//! [`ParameterValidator::validate_text`], which first converts the text to the
//! type the definition declares.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`engine`] | [`SchemaEngine`] seam and the `jsonschema`-backed default |
//! | [`options`] | [`ValidatorOptions`] for the default engine |
//!
//! ## Example
//!
//! ```rust
//! use cnab_rust::manifest::{Bundle, Definition, DefinitionType, Parameter};
//! use cnab_rust::validation::{ParameterValidator, Validator};
//!
//! let mut bundle = Bundle::new("example", "1.0.0");
//! bundle.definitions = Some([("port".to_string(), Definition::of_type(DefinitionType::Integer))].into());
//! bundle.parameters = Some([("port".to_string(), Parameter::new("port"))].into());
//!
//! let validator = Validator::for_bundle(&bundle);
//! assert!(validator.validate("port", 8080.into()).is_valid());
//! assert!(validator.validate_text("port", "8080").is_valid());
//! assert!(!validator.validate_text("port", "eighty").is_valid());
//! ```

mod coerce;
pub mod engine;
pub mod options;

pub use engine::{JsonSchemaEngine, SchemaEngine};
pub use options::{SchemaDraft, ValidatorOptions, SCHEMA_DRAFT_ENV};

use serde_json::Value;

use crate::manifest::{Bundle, Definition};

/// Reason reported for every schema resolution failure.
pub const UNRESOLVED_SCHEMA_REASON: &str = "Bundle does not specify valid parameter values";

/// Outcome of checking a value against a parameter's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid { reason: String },
}

impl Validity {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Validity::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    /// Why the value was rejected; `None` when valid.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid { reason } => Some(reason),
        }
    }
}

/// A candidate parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl ParameterValue {
    /// JSON form handed to the schema engine. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::String(s) => Value::String(s.clone()),
            ParameterValue::Integer(i) => Value::from(*i),
            ParameterValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ParameterValue::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

/// Checks candidate values for a bundle's parameters.
pub trait ParameterValidator {
    /// Validate an already-typed value.
    fn validate(&self, parameter: &str, value: ParameterValue) -> Validity;

    /// Validate a value supplied as text, converting it to the declared type first.
    fn validate_text(&self, parameter: &str, value_text: &str) -> Validity;
}

#[derive(Debug, thiserror::Error)]
enum Unresolved {
    #[error("bundle has no parameters section")]
    NoParameters,
    #[error("bundle has no definitions section")]
    NoDefinitions,
    #[error("parameter is not declared")]
    UnknownParameter,
    #[error("definition '{0}' is not declared")]
    DanglingDefinition(String),
}

/// Validates parameter values against the definitions of one bundle.
///
/// Holds only a borrow of the bundle; schemas are resolved on every call.
#[derive(Debug, Clone)]
pub struct Validator<'a, E = JsonSchemaEngine> {
    bundle: &'a Bundle,
    engine: E,
}

impl<'a> Validator<'a> {
    /// Create a validator using the default `jsonschema` engine.
    pub fn for_bundle(bundle: &'a Bundle) -> Self {
        Self::with_engine(bundle, JsonSchemaEngine::default())
    }

    pub fn with_options(bundle: &'a Bundle, options: ValidatorOptions) -> Self {
        Self::with_engine(bundle, JsonSchemaEngine::new(options))
    }
}

impl<'a, E: SchemaEngine> Validator<'a, E> {
    pub fn with_engine(bundle: &'a Bundle, engine: E) -> Self {
        Self { bundle, engine }
    }

    pub fn bundle(&self) -> &'a Bundle {
        self.bundle
    }

    fn resolve(&self, parameter: &str) -> Result<&'a Definition, Unresolved> {
        let parameters = self
            .bundle
            .parameters
            .as_ref()
            .ok_or(Unresolved::NoParameters)?;
        let definitions = self
            .bundle
            .definitions
            .as_ref()
            .ok_or(Unresolved::NoDefinitions)?;
        let info = parameters
            .get(parameter)
            .ok_or(Unresolved::UnknownParameter)?;
        definitions
            .get(&info.definition)
            .ok_or_else(|| Unresolved::DanglingDefinition(info.definition.clone()))
    }

    fn resolve_or_log(&self, parameter: &str) -> Option<&'a Definition> {
        match self.resolve(parameter) {
            Ok(definition) => Some(definition),
            Err(cause) => {
                tracing::debug!(parameter, %cause, "parameter schema could not be resolved");
                None
            }
        }
    }

    fn check(&self, parameter: &str, definition: &Definition, value: &ParameterValue) -> Validity {
        match self.engine.check(&definition.to_schema(), &value.to_json()) {
            Ok(()) => Validity::Valid,
            Err(violations) => {
                tracing::debug!(
                    parameter,
                    violations = violations.len(),
                    "parameter value rejected by schema"
                );
                Validity::invalid(violations.join(", "))
            }
        }
    }
}

impl<E: SchemaEngine> ParameterValidator for Validator<'_, E> {
    fn validate(&self, parameter: &str, value: ParameterValue) -> Validity {
        match self.resolve_or_log(parameter) {
            Some(definition) => self.check(parameter, definition, &value),
            None => Validity::invalid(UNRESOLVED_SCHEMA_REASON),
        }
    }

    fn validate_text(&self, parameter: &str, value_text: &str) -> Validity {
        let Some(definition) = self.resolve_or_log(parameter) else {
            return Validity::invalid(UNRESOLVED_SCHEMA_REASON);
        };

        match coerce::coerce(definition.text_type(), value_text) {
            Ok(value) => self.check(parameter, definition, &value),
            Err(e) => Validity::invalid(e.to_string()),
        }
    }
}

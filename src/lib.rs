//! # cnab-rust
//!
//! Cloud Native Application Bundle (CNAB) manifest model, installation claim
//! parsing and parameter validation.
//!
//! ## Overview
//!
//! A CNAB bundle declares the parameters an installer accepts and a JSON
//! Schema definition for each of them. This library lets tooling work out
//! which parameters an action needs, check candidate values against the
//! bundle's own schemas before running anything, and read back the claim
//! record an installation leaves behind.
//!
//! ## Key Features
//!
//! - **Manifest Model**: serde types for the full CNAB v1 `bundle.json` catalogue, see [`manifest`]
//! - **Parameter Filtering**: which parameters apply to an action and which are mandatory, see [`parameters`]
//! - **Validation**: typed and free-text parameter values checked against bundle definitions via [`Validator`]
//! - **Claims**: [`Claim::parse`] with timestamp rehydration
//!
//! ## Quick Start
//!
//! ```rust
//! use cnab_rust::{parameters, Bundle, ParameterValidator, Validator};
//!
//! let bundle = Bundle::from_json_str(r#"{
//!     "name": "wordpress",
//!     "schemaVersion": "v1",
//!     "version": "0.2.0",
//!     "invocationImages": [{ "image": "example/wordpress-installer:0.2.0" }],
//!     "definitions": { "replicas": { "type": "integer", "minimum": 1, "maximum": 5 } },
//!     "parameters": {
//!         "replicas": { "definition": "replicas", "destination": { "env": "REPLICAS" }, "applyTo": ["install", "upgrade"] }
//!     }
//! }"#)?;
//!
//! assert_eq!(parameters::for_action(&bundle, "install"), vec!["replicas"]);
//! assert!(parameters::for_action(&bundle, "uninstall").is_empty());
//!
//! let validator = Validator::for_bundle(&bundle);
//! assert!(validator.validate_text("replicas", "3").is_valid());
//! assert!(!validator.validate_text("replicas", "9").is_valid());
//! # Ok::<(), cnab_rust::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`manifest`] | Bundle manifest data model |
//! | [`parameters`] | Parameter, output and credential applicability |
//! | [`validation`] | Parameter schema resolution and value validation |
//! | [`claim`] | Installation claim records |
//! | [`error`] | Crate error type |

pub mod claim;
pub mod manifest;
pub mod parameters;
pub mod validation;

// Re-export main types for convenience
pub use claim::{ActionResult, ActionStatus, Claim};
pub use manifest::{Bundle, Definition, DefinitionType, Parameter};
pub use validation::{ParameterValidator, ParameterValue, Validator, ValidatorOptions, Validity};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

//! Bundle manifest model.
//!
//! # Manifest Layer
//!
//! Passive data shapes describing a CNAB bundle: invocation images, actions,
//! credentials, parameters, outputs and the schema definitions they refer to.
//! Everything here round-trips through serde using the `bundle.json` field
//! names; nothing in this crate mutates a bundle once it has been loaded.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bundle`] | The root [`Bundle`] and its images, actions, credentials, parameters and outputs |
//! | [`definition`] | Schema fragments ([`Definition`]) referenced by parameters and outputs |
//!
//! ## Example
//!
//! ```rust
//! use cnab_rust::manifest::Bundle;
//!
//! let bundle = Bundle::from_json_str(r#"{
//!     "name": "helloworld",
//!     "schemaVersion": "v1",
//!     "version": "0.1.0",
//!     "invocationImages": [{ "image": "cnab/helloworld:0.1.0" }]
//! }"#)?;
//! assert_eq!(bundle.invocation_images.len(), 1);
//! # Ok::<(), cnab_rust::Error>(())
//! ```

pub mod bundle;
pub mod definition;

pub use bundle::{
    Action, Bundle, Credential, Image, InvocationImage, Maintainer, Output, Parameter,
    ParameterDestination, SchemaVersion,
};
pub use definition::{Definition, DefinitionType};

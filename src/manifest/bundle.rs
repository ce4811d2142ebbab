//! Bundle manifest structure
//!
//! Field names follow the CNAB v1 `bundle.json` layout (camelCase on the wire).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::definition::Definition;
use crate::error::{Error, ErrorContext};

/// The version of the CNAB specification a bundle conforms to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
}

/// A CNAB (Cloud Native Application Bundle) manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    // Required fields
    pub name: String,
    pub schema_version: SchemaVersion,
    pub version: String,
    pub invocation_images: Vec<InvocationImage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Maintainer>>,

    // Images and actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<IndexMap<String, Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<IndexMap<String, Action>>,

    // Inputs, outputs and their schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<IndexMap<String, Credential>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, Definition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, Parameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<IndexMap<String, Output>>,

    // Extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<IndexMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_extensions: Option<Vec<String>>,
}

impl Bundle {
    /// Create a bundle with only the required fields populated.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_version: SchemaVersion::V1,
            version: version.into(),
            invocation_images: Vec::new(),
            description: None,
            keywords: None,
            license: None,
            maintainers: None,
            images: None,
            actions: None,
            credentials: None,
            definitions: None,
            parameters: None,
            outputs: None,
            custom: None,
            required_extensions: None,
        }
    }

    /// Parse a bundle from `bundle.json` text.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| {
            Error::manifest_with_context(
                format!("Bundle JSON does not match the manifest model: {}", e),
                ErrorContext::new().with_source("bundle_json"),
            )
        })
    }

    /// Parse a bundle from a YAML rendition of the manifest.
    pub fn from_yaml_str(text: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serialize the bundle back to `bundle.json` text.
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A custom action that can be triggered on a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the action changes any resource managed by the bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifies: Option<bool>,
    /// Indicates that the action is purely informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stateless: Option<bool>,
}

/// A credential whose value is used when executing the invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// An application image used in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_digest: Option<String>,
    /// Treated as `oci` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// An image that is executed to perform a bundle action such as installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationImage {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_digest: Option<String>,
    /// Treated as `oci` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A party responsible for a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A value that is produced by and may be retrieved from an invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Name of the definition holding the output schema.
    pub definition: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<Vec<String>>,
}

impl Output {
    /// Check whether the output is produced by `action`
    pub fn applies_to(&self, action: &str) -> bool {
        applies_to(self.apply_to.as_deref(), action)
    }
}

/// A parameter that can be given a value when executing the invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Name of the definition holding the parameter schema.
    pub definition: String,
    pub destination: ParameterDestination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl Parameter {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            ..Self::default()
        }
    }

    /// Check whether the parameter is consumed by `action`
    pub fn applies_to(&self, action: &str) -> bool {
        applies_to(self.apply_to.as_deref(), action)
    }
}

/// Specifies where a parameter value will be surfaced in the invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// Missing or empty means every action.
fn applies_to(apply_to: Option<&[String]>, action: &str) -> bool {
    match apply_to {
        None | Some([]) => true,
        Some(actions) => actions.iter().any(|a| a == action),
    }
}

//! Schema fragments for parameter and output values.
//!
//! A [`Definition`] is a JSON Schema document. Only the keywords tooling needs
//! to reason about (`type`, `default`, `enum`) are typed; everything else is
//! kept verbatim in [`Definition::extra`] so it reaches the schema engine
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The underlying data type of a parameter or output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionType {
    Number,
    Integer,
    String,
    Boolean,
}

impl DefinitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionType::Number => "number",
            DefinitionType::Integer => "integer",
            DefinitionType::String => "string",
            DefinitionType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for DefinitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The schema of a value (output or parameter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<DefinitionType>,

    /// `Some(Value::Null)` for an explicit `"default": null`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Remaining JSON Schema keywords (`minLength`, `maximum`, `pattern`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Definition {
    pub fn of_type(value_type: DefinitionType) -> Self {
        Self {
            value_type: Some(value_type),
            ..Self::default()
        }
    }

    /// Add a constraint keyword, replacing any previous value for it.
    pub fn with_keyword(mut self, keyword: impl Into<String>, value: Value) -> Self {
        self.extra.insert(keyword.into(), value);
        self
    }

    /// Type used when interpreting free text; `string` when undeclared.
    pub fn text_type(&self) -> DefinitionType {
        self.value_type.unwrap_or(DefinitionType::String)
    }

    /// Render the complete JSON Schema document for this definition.
    pub fn to_schema(&self) -> Value {
        let mut schema = self.extra.clone();
        if let Some(value_type) = self.value_type {
            schema.insert("type".to_string(), Value::from(value_type.as_str()));
        }
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        if let Some(values) = &self.enum_values {
            schema.insert("enum".to_string(), Value::Array(values.clone()));
        }
        Value::Object(schema)
    }
}

// A present key always yields `Some`, even when its value is `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_keywords_are_preserved() {
        let def: Definition = serde_json::from_value(json!({
            "type": "string",
            "minLength": 4,
            "maxLength": 7,
            "pattern": "^[a-z0-9]+$"
        }))
        .unwrap();

        assert_eq!(def.value_type, Some(DefinitionType::String));
        assert_eq!(def.extra.get("minLength"), Some(&json!(4)));
        assert_eq!(
            def.to_schema(),
            json!({"type": "string", "minLength": 4, "maxLength": 7, "pattern": "^[a-z0-9]+$"})
        );
    }

    #[test]
    fn test_enum_and_default_are_typed() {
        let def: Definition = serde_json::from_value(json!({
            "type": "integer",
            "default": 3,
            "enum": [1, 3, 5]
        }))
        .unwrap();

        assert_eq!(def.default, Some(json!(3)));
        assert_eq!(def.enum_values, Some(vec![json!(1), json!(3), json!(5)]));
        assert!(def.extra.is_empty());
        assert_eq!(def.to_schema()["enum"], json!([1, 3, 5]));
    }

    #[test]
    fn test_explicit_null_default_is_kept() {
        let def: Definition =
            serde_json::from_value(json!({"type": "string", "default": null})).unwrap();

        assert_eq!(def.default, Some(Value::Null));
        assert_eq!(def.to_schema(), json!({"type": "string", "default": null}));

        let absent: Definition = serde_json::from_value(json!({"type": "string"})).unwrap();
        assert_eq!(absent.default, None);
        assert!(absent.to_schema().get("default").is_none());
    }

    #[test]
    fn test_type_is_closed() {
        let result = serde_json::from_value::<Definition>(json!({"type": "object"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_text_type_defaults_to_string() {
        assert_eq!(Definition::default().text_type(), DefinitionType::String);
        assert_eq!(
            Definition::of_type(DefinitionType::Boolean).text_type(),
            DefinitionType::Boolean
        );
        assert_eq!(Definition::default().to_schema(), json!({}));
    }
}

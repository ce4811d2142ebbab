//! Schema engines that check a value against a definition.

use jsonschema::JSONSchema;
use serde_json::Value;

use super::options::ValidatorOptions;

/// Checks a value against a JSON Schema document.
///
/// Implementations report every violation they find, in their own order.
pub trait SchemaEngine: Send + Sync {
    fn check(&self, schema: &Value, instance: &Value) -> Result<(), Vec<String>>;
}

/// [`SchemaEngine`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaEngine {
    options: ValidatorOptions,
}

impl JsonSchemaEngine {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }
}

impl SchemaEngine for JsonSchemaEngine {
    fn check(&self, schema: &Value, instance: &Value) -> Result<(), Vec<String>> {
        let compiled = JSONSchema::options()
            .with_draft(self.options.draft.to_jsonschema())
            .compile(schema)
            .map_err(|e| vec![format!("Bundle definition is not a valid schema: {}", e)])?;

        if let Err(errors) = compiled.validate(instance) {
            return Err(errors.map(|e| e.to_string()).collect());
        }
        Ok(())
    }
}

//! Validator configuration

use std::str::FromStr;

use jsonschema::Draft;

use crate::error::{Error, ErrorContext};

/// Environment variable consulted by [`ValidatorOptions::from_env`].
pub const SCHEMA_DRAFT_ENV: &str = "CNAB_SCHEMA_DRAFT";

/// JSON Schema draft used to interpret bundle definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaDraft {
    Draft4,
    Draft6,
    #[default]
    Draft7,
}

impl SchemaDraft {
    pub(crate) fn to_jsonschema(self) -> Draft {
        match self {
            SchemaDraft::Draft4 => Draft::Draft4,
            SchemaDraft::Draft6 => Draft::Draft6,
            SchemaDraft::Draft7 => Draft::Draft7,
        }
    }
}

impl FromStr for SchemaDraft {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "draft4" => Ok(SchemaDraft::Draft4),
            "6" | "draft6" => Ok(SchemaDraft::Draft6),
            "7" | "draft7" => Ok(SchemaDraft::Draft7),
            other => Err(Error::configuration_with_context(
                format!("Unsupported JSON Schema draft '{}'", other),
                ErrorContext::new()
                    .with_details("expected one of: draft4, draft6, draft7")
                    .with_source("validator_options"),
            )),
        }
    }
}

/// Options for the default schema engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub draft: SchemaDraft,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(mut self, draft: SchemaDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Build options from the process environment.
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are errors.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(SCHEMA_DRAFT_ENV) {
            Ok(raw) => Ok(Self::new().with_draft(raw.parse()?)),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_draft7() {
        assert_eq!(ValidatorOptions::new().draft, SchemaDraft::Draft7);
    }

    #[test]
    fn test_parse_draft_names() {
        assert_eq!("4".parse::<SchemaDraft>().unwrap(), SchemaDraft::Draft4);
        assert_eq!("Draft6".parse::<SchemaDraft>().unwrap(), SchemaDraft::Draft6);
        assert_eq!(" draft7 ".parse::<SchemaDraft>().unwrap(), SchemaDraft::Draft7);
    }

    #[test]
    fn test_unknown_draft_is_configuration_error() {
        let err = "2020-12".parse::<SchemaDraft>().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("2020-12"));
    }
}

//! Installation claim records.
//!
//! A claim is the record a CNAB tool keeps for one installation: the bundle
//! that was installed, when the record was created and last changed, and the
//! outcome of the most recent action. Always go through [`Claim::parse`]
//! rather than deserializing the text directly, so the timestamp fields get
//! rehydrated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::OffsetDateTime;

use crate::error::{Error, ErrorContext};
use crate::manifest::Bundle;

/// A record of a CNAB installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// The definition of the bundle that was installed.
    ///
    /// Kept as raw JSON: tools routinely write partial bundles here. Use
    /// [`Claim::bundle_manifest`] for the typed form.
    pub bundle: serde_json::Value,

    /// Raw timestamp as written: normally an RFC 3339 string, sometimes
    /// epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<serde_json::Value>,

    /// `created` as an instant; `None` when missing or unparsable.
    #[serde(skip)]
    pub created_time: Option<OffsetDateTime>,
    /// `modified` as an instant; `None` when missing or unparsable.
    #[serde(skip)]
    pub modified_time: Option<OffsetDateTime>,

    /// The name of the installation.
    pub name: String,
    /// Changes each time the installation is modified.
    pub revision: String,

    /// Tool-specific data associated with the installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<IndexMap<String, String>>,
    /// The resolved parameters used during the last action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ActionResult>,
}

/// The result of a CNAB action such as installation or upgrading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: String,
    pub message: String,
    pub status: ActionStatus,
}

/// The last known status of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Failure,
    Underway,
    Unknown,
    Success,
}

impl Claim {
    /// Parse a claim from its JSON text.
    ///
    /// Fails only when the text is not a claim-shaped JSON document. Bad
    /// timestamps leave the matching `*_time` field as `None`.
    pub fn parse(json_text: &str) -> Result<Self, Error> {
        let mut claim: Claim = serde_json::from_str(json_text).map_err(Error::ClaimParse)?;
        claim.created_time = rehydrate("created", claim.created.as_ref());
        claim.modified_time = rehydrate("modified", claim.modified.as_ref());
        Ok(claim)
    }

    /// Decode the embedded bundle into the manifest model.
    pub fn bundle_manifest(&self) -> Result<Bundle, Error> {
        serde_json::from_value(self.bundle.clone()).map_err(|e| {
            Error::manifest_with_context(
                e.to_string(),
                ErrorContext::new()
                    .with_field_path("bundle")
                    .with_details(format!("claim '{}'", self.name))
                    .with_source("claim"),
            )
        })
    }

    /// Serialize the claim back to its JSON text.
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

fn rehydrate(field: &str, raw: Option<&serde_json::Value>) -> Option<OffsetDateTime> {
    let raw = raw?;
    let parsed = match raw {
        serde_json::Value::String(text) => OffsetDateTime::parse(text, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
            .map_err(|e| e.to_string()),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(millis) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
                    .map_err(|e| e.to_string())
            }
            None => Err("epoch milliseconds must be a whole number".to_string()),
        },
        other => Err(format!("unexpected JSON {}", json_kind(other))),
    };
    match parsed {
        Ok(instant) => Some(instant),
        Err(error) => {
            tracing::warn!(field, raw = %raw, %error, "claim timestamp is not a valid instant");
            None
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn test_claim_json() -> String {
        serde_json::to_string_pretty(&json!({
            "bundle": {},
            "created": "2018-08-30T20:01:23.45600-06:00",
            "modified": "2018-09-10T20:01:23.45600+06:00",
            "name": "hello",
            "revision": "ABCDE"
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_created_time() {
        let claim = Claim::parse(&test_claim_json()).unwrap();
        assert_eq!(claim.created_time, Some(datetime!(2018-08-31 02:01:23.456 UTC)));
    }

    #[test]
    fn test_parses_modified_time() {
        let claim = Claim::parse(&test_claim_json()).unwrap();
        assert_eq!(claim.modified_time, Some(datetime!(2018-09-10 14:01:23.456 UTC)));
    }

    #[test]
    fn test_other_fields_pass_through() {
        let claim = Claim::parse(&test_claim_json()).unwrap();
        assert_eq!(claim.name, "hello");
        assert_eq!(claim.revision, "ABCDE");
        assert_eq!(claim.bundle, json!({}));
        assert!(claim.result.is_none());
    }

    #[test]
    fn test_malformed_text_is_a_parse_error() {
        assert!(matches!(Claim::parse("{ not json"), Err(Error::ClaimParse(_))));
        assert!(matches!(Claim::parse("[1, 2, 3]"), Err(Error::ClaimParse(_))));
    }

    #[test]
    fn test_bad_timestamps_become_none() {
        let claim = Claim::parse(
            r#"{"bundle": {}, "created": "last tuesday", "name": "n", "revision": "r"}"#,
        )
        .unwrap();
        assert!(claim.created_time.is_none());
        assert!(claim.modified_time.is_none());
    }

    #[test]
    fn test_numeric_created_is_epoch_millis() {
        let claim = Claim::parse(
            r#"{"bundle":{},"created":1535688083456,"modified":"2018-08-30T20:01:23Z","name":"n","revision":"r"}"#,
        )
        .unwrap();
        assert_eq!(claim.created_time, Some(datetime!(2018-08-31 04:01:23.456 UTC)));
        assert_eq!(claim.modified_time, Some(datetime!(2018-08-30 20:01:23 UTC)));
        assert_eq!(claim.created, Some(json!(1535688083456_i64)));
    }

    #[test]
    fn test_non_timestamp_values_become_none() {
        let claim = Claim::parse(
            r#"{"bundle":{},"created":1.5,"modified":{"at":"noon"},"name":"n","revision":"r"}"#,
        )
        .unwrap();
        assert!(claim.created_time.is_none());
        assert!(claim.modified_time.is_none());

        let claim = Claim::parse(
            r#"{"bundle":{},"created":true,"modified":null,"name":"n","revision":"r"}"#,
        )
        .unwrap();
        assert!(claim.created_time.is_none());
        assert!(claim.modified_time.is_none());
    }

    #[test]
    fn test_result_and_parameters() {
        let claim = Claim::parse(
            r#"{
                "bundle": {},
                "created": "2018-08-30T20:01:23Z",
                "modified": "2018-08-30T20:01:23Z",
                "name": "n",
                "revision": "r",
                "parameters": {"port": 8080, "debug": true},
                "outputs": {"endpoint": "http://localhost:8080"},
                "result": {"action": "install", "message": "done", "status": "success"}
            }"#,
        )
        .unwrap();

        let result = claim.result.as_ref().unwrap();
        assert_eq!(result.status, ActionStatus::Success);
        assert_eq!(result.action, "install");
        assert_eq!(claim.parameters.as_ref().unwrap()["port"], json!(8080));
        assert_eq!(
            claim.outputs.as_ref().unwrap()["endpoint"],
            "http://localhost:8080"
        );
        assert_eq!(claim.created_time, Some(datetime!(2018-08-30 20:01:23 UTC)));
    }

    #[test]
    fn test_bundle_manifest() {
        let claim = Claim::parse(&test_claim_json()).unwrap();
        let err = claim.bundle_manifest().unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("bundle")
        );

        let mut complete = claim;
        complete.bundle = json!({
            "name": "hello",
            "schemaVersion": "v1",
            "version": "1.0.0",
            "invocationImages": []
        });
        assert_eq!(complete.bundle_manifest().unwrap().name, "hello");
    }

    #[test]
    fn test_round_trip_skips_derived_times() {
        let claim = Claim::parse(&test_claim_json()).unwrap();
        let text = claim.to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("created_time").is_none());
        assert_eq!(value["created"], "2018-08-30T20:01:23.45600-06:00");
        assert_eq!(Claim::parse(&text).unwrap(), claim);
    }
}

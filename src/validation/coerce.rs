//! Free-text to typed value coercion.
//!
//! Numbers must be written in plain decimal notation. Exponent forms such as
//! `1e3` are refused even though Rust's float parser would take them, as are
//! `inf`, `NaN` and hex literals.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ParameterValue;
use crate::manifest::DefinitionType;

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("decimal pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CoercionError {
    #[error("The value must be a whole number")]
    NotWholeNumber,
    #[error("The value must be a number")]
    NotNumber,
    #[error("The value must be either \"true\" or \"false\"")]
    NotBoolean,
}

/// Interpret `text` as a value of `value_type`.
pub(crate) fn coerce(
    value_type: DefinitionType,
    text: &str,
) -> Result<ParameterValue, CoercionError> {
    match value_type {
        DefinitionType::String => Ok(ParameterValue::String(text.to_string())),
        DefinitionType::Integer => parse_whole_number(text.trim()),
        DefinitionType::Number => parse_number(text.trim()),
        DefinitionType::Boolean => parse_boolean(text.trim()),
    }
}

fn parse_whole_number(text: &str) -> Result<ParameterValue, CoercionError> {
    if !DECIMAL.is_match(text) {
        return Err(CoercionError::NotWholeNumber);
    }
    if let Ok(whole) = text.parse::<i64>() {
        return Ok(ParameterValue::Integer(whole));
    }

    // "12.0" is whole; so is anything beyond the i64 range with no fraction.
    let value: f64 = text.parse().map_err(|_| CoercionError::NotWholeNumber)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(CoercionError::NotWholeNumber);
    }
    if value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(ParameterValue::Integer(value as i64))
    } else {
        Ok(ParameterValue::Number(value))
    }
}

fn parse_number(text: &str) -> Result<ParameterValue, CoercionError> {
    if !DECIMAL.is_match(text) {
        return Err(CoercionError::NotNumber);
    }
    let value: f64 = text.parse().map_err(|_| CoercionError::NotNumber)?;
    if !value.is_finite() {
        return Err(CoercionError::NotNumber);
    }
    Ok(ParameterValue::Number(value))
}

fn parse_boolean(text: &str) -> Result<ParameterValue, CoercionError> {
    if text.eq_ignore_ascii_case("true") {
        Ok(ParameterValue::Boolean(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(ParameterValue::Boolean(false))
    } else {
        Err(CoercionError::NotBoolean)
    }
}

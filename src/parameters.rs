//! Parameter, output and credential applicability.
//!
//! Absent data always resolves to the permissive answer for applicability
//! ("applies") and the restrictive one for requirement ("not required").

use crate::manifest::Bundle;

/// Gets the names of the parameters consumed by `action`, such as `install`.
///
/// Names come back in bundle declaration order. A parameter with no `applyTo`
/// list, or an empty one, applies to every action.
pub fn for_action<'a>(bundle: &'a Bundle, action: &str) -> Vec<&'a str> {
    let Some(parameters) = bundle.parameters.as_ref() else {
        return Vec::new();
    };

    parameters
        .iter()
        .filter(|(_, parameter)| parameter.applies_to(action))
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Gets whether a parameter must be supplied.
pub fn is_required(bundle: &Bundle, parameter: &str) -> bool {
    bundle
        .parameters
        .as_ref()
        .and_then(|parameters| parameters.get(parameter))
        .and_then(|p| p.required)
        .unwrap_or(false)
}

/// Gets the names of the outputs produced by `action`, in declaration order.
pub fn outputs_for_action<'a>(bundle: &'a Bundle, action: &str) -> Vec<&'a str> {
    let Some(outputs) = bundle.outputs.as_ref() else {
        return Vec::new();
    };

    outputs
        .iter()
        .filter(|(_, output)| output.applies_to(action))
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Gets whether a credential must be supplied.
pub fn is_credential_required(bundle: &Bundle, credential: &str) -> bool {
    bundle
        .credentials
        .as_ref()
        .and_then(|credentials| credentials.get(credential))
        .and_then(|c| c.required)
        .unwrap_or(false)
}

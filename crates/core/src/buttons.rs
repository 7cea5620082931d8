//! Button-group validation.
//!
//! A project's button groups define the palette of category labels the
//! annotation UI offers. Buttons are stored as a JSONB array of
//! `{ "label": ..., "color": ... }` objects; the labels feed directly into
//! category annotations, so they obey the same label rules.

use crate::annotation::{validate_color_hex, validate_label};
use crate::error::CoreError;

/// Maximum length of a button-group name.
pub const MAX_GROUP_NAME_LEN: usize = 100;

/// Maximum number of buttons in one group.
pub const MAX_BUTTONS_PER_GROUP: usize = 50;

/// Validate a button-group name: non-empty, at most
/// [`MAX_GROUP_NAME_LEN`] characters.
pub fn validate_group_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Button group name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Button group name must not exceed {MAX_GROUP_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a buttons JSONB payload.
///
/// The value must be an array of at most [`MAX_BUTTONS_PER_GROUP`] objects;
/// each needs a `label` string passing annotation label rules, and may carry
/// a `color` in hex format. Duplicate labels within one group are rejected.
pub fn validate_buttons_json(json: &serde_json::Value) -> Result<(), CoreError> {
    let arr = json
        .as_array()
        .ok_or_else(|| CoreError::Validation("buttons must be a JSON array".to_string()))?;

    if arr.len() > MAX_BUTTONS_PER_GROUP {
        return Err(CoreError::Validation(format!(
            "buttons has {} elements, maximum is {MAX_BUTTONS_PER_GROUP}",
            arr.len()
        )));
    }

    let mut seen = std::collections::HashSet::with_capacity(arr.len());
    for (i, item) in arr.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| CoreError::Validation(format!("buttons[{i}] must be a JSON object")))?;

        let label = obj
            .get("label")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                CoreError::Validation(format!("buttons[{i}] is missing required string 'label'"))
            })?;
        validate_label(label)?;

        if !seen.insert(label) {
            return Err(CoreError::Validation(format!(
                "Duplicate button label: \"{label}\""
            )));
        }

        if let Some(color) = obj.get("color") {
            let color = color.as_str().ok_or_else(|| {
                CoreError::Validation(format!("buttons[{i}].color must be a string"))
            })?;
            validate_color_hex(color)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_group_accepted() {
        assert!(validate_group_name("behaviors").is_ok());
        let buttons = json!([
            {"label": "walking", "color": "#44FF44"},
            {"label": "resting"}
        ]);
        assert!(validate_buttons_json(&buttons).is_ok());
    }

    #[test]
    fn empty_group_name_rejected() {
        assert!(validate_group_name("").is_err());
    }

    #[test]
    fn empty_button_list_accepted() {
        assert!(validate_buttons_json(&json!([])).is_ok());
    }

    #[test]
    fn non_array_rejected() {
        assert!(validate_buttons_json(&json!({"label": "walking"})).is_err());
    }

    #[test]
    fn button_without_label_rejected() {
        let err = validate_buttons_json(&json!([{"color": "#FFFFFF"}])).unwrap_err();
        assert!(err.to_string().contains("missing required string 'label'"));
    }

    #[test]
    fn duplicate_labels_rejected() {
        let buttons = json!([{"label": "walking"}, {"label": "walking"}]);
        let err = validate_buttons_json(&buttons).unwrap_err();
        assert!(err.to_string().contains("Duplicate button label"));
    }

    #[test]
    fn bad_color_rejected() {
        let buttons = json!([{"label": "walking", "color": "green"}]);
        assert!(validate_buttons_json(&buttons).is_err());
    }

    #[test]
    fn too_many_buttons_rejected() {
        let entries: Vec<_> = (0..MAX_BUTTONS_PER_GROUP + 1)
            .map(|i| json!({"label": format!("label-{i}")}))
            .collect();
        assert!(validate_buttons_json(&serde_json::Value::Array(entries)).is_err());
    }
}

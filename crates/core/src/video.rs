//! Video document validation and additional-field descriptors.
//!
//! Each video may carry `additional_fields`: a JSON array of
//! `{ "name": ..., "value": ... }` descriptors, where `name` identifies an
//! auxiliary series (a canvas overlay or chart) and `value` is the path of
//! the file holding its per-frame samples.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a video name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an additional-field name.
pub const MAX_FIELD_NAME_LEN: usize = 100;

/// Maximum number of additional fields per video.
pub const MAX_ADDITIONAL_FIELDS: usize = 32;

/// One named auxiliary data source attached to a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalField {
    /// Series name, e.g. `canvas1` or `chart1`.
    pub name: String,
    /// Path to the file holding the per-frame samples. Absent when the
    /// client registered the field without data.
    pub value: Option<String>,
}

/// Validate a video name: non-empty, at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Video name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Video name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a video file path: non-empty.
pub fn validate_path(path: &str) -> Result<(), CoreError> {
    if path.trim().is_empty() {
        return Err(CoreError::Validation(
            "Video path must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parse and validate an `additional_fields` JSONB value into typed
/// descriptors.
///
/// The value must be an array of objects each carrying a non-empty `name`;
/// duplicate names are rejected since a name must resolve to exactly one
/// series file.
pub fn parse_additional_fields(value: &serde_json::Value) -> Result<Vec<AdditionalField>, CoreError> {
    let fields: Vec<AdditionalField> = serde_json::from_value(value.clone()).map_err(|e| {
        CoreError::Validation(format!(
            "additional_fields must be an array of {{name, value}} objects: {e}"
        ))
    })?;

    if fields.len() > MAX_ADDITIONAL_FIELDS {
        return Err(CoreError::Validation(format!(
            "additional_fields has {} entries, maximum is {MAX_ADDITIONAL_FIELDS}",
            fields.len()
        )));
    }

    let mut seen = std::collections::HashSet::with_capacity(fields.len());
    for field in &fields {
        if field.name.is_empty() {
            return Err(CoreError::Validation(
                "additional_fields entries must have a non-empty name".to_string(),
            ));
        }
        if field.name.chars().count() > MAX_FIELD_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "additional_fields name '{}' exceeds {MAX_FIELD_NAME_LEN} characters",
                field.name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate additional_fields name: \"{}\"",
                field.name
            )));
        }
    }

    Ok(fields)
}

/// Find the additional field with the given name, if any.
pub fn find_additional_field<'a>(
    fields: &'a [AdditionalField],
    name: &str,
) -> Option<&'a AdditionalField> {
    fields.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_name_and_path_accepted() {
        assert!(validate_name("trial-03.mp4").is_ok());
        assert!(validate_path("/data/trials/trial-03.mp4").is_ok());
    }

    #[test]
    fn empty_name_and_path_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_path("  ").is_err());
    }

    #[test]
    fn additional_fields_parse_round_trip() {
        let value = json!([
            {"name": "canvas1", "value": "/data/trial-03.traj.json"},
            {"name": "chart1", "value": null}
        ]);
        let fields = parse_additional_fields(&value).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "canvas1");
        assert_eq!(fields[1].value, None);

        let found = find_additional_field(&fields, "chart1").unwrap();
        assert_eq!(found.name, "chart1");
        assert!(find_additional_field(&fields, "chart9").is_none());
    }

    #[test]
    fn non_array_rejected() {
        assert!(parse_additional_fields(&json!({"name": "canvas1"})).is_err());
    }

    #[test]
    fn entry_without_name_rejected() {
        assert!(parse_additional_fields(&json!([{"value": "x.csv"}])).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        let value = json!([{"name": "", "value": "x.csv"}]);
        assert!(parse_additional_fields(&value).is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let value = json!([
            {"name": "chart1", "value": "a.csv"},
            {"name": "chart1", "value": "b.csv"}
        ]);
        let err = parse_additional_fields(&value).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn too_many_fields_rejected() {
        let entries: Vec<_> = (0..MAX_ADDITIONAL_FIELDS + 1)
            .map(|i| json!({"name": format!("field-{i}"), "value": null}))
            .collect();
        assert!(parse_additional_fields(&serde_json::Value::Array(entries)).is_err());
    }
}

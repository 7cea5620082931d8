//! Project document validation.

use crate::error::CoreError;

/// Maximum length of a project name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a project description.
pub const MAX_DESCRIPTION_LEN: usize = 300;

/// Validate a project name: non-empty, at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional project description.
pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(CoreError::Validation(format!(
                "Project description must not exceed {MAX_DESCRIPTION_LEN} characters"
            )));
        }
    }
    Ok(())
}

//! Annotation kinds and validation.
//!
//! Annotations are per-frame records on a video. `category` annotations are
//! label events driven by the project's button groups and carry the logical
//! uniqueness constraint enforced by [`crate::gate`]; `marker` annotations
//! are free-form per-frame markup and may repeat.

use crate::error::CoreError;

/// A category label toggled on a frame. At most one per
/// `(video_id, frame_num, label)`.
pub const KIND_CATEGORY: &str = "category";

/// Free-form markup on a frame. No uniqueness constraint.
pub const KIND_MARKER: &str = "marker";

/// All valid annotation kind values.
pub const VALID_KINDS: &[&str] = &[KIND_CATEGORY, KIND_MARKER];

/// Maximum length of an annotation label.
pub const MAX_LABEL_LEN: usize = 100;

/// Returns `true` if the given string is a valid annotation kind.
pub fn is_valid_kind(s: &str) -> bool {
    VALID_KINDS.contains(&s)
}

/// Validate an annotation kind string.
pub fn validate_kind(kind: &str) -> Result<(), CoreError> {
    if is_valid_kind(kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid annotation kind '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        )))
    }
}

/// Validate an annotation label.
///
/// Must be non-empty and at most [`MAX_LABEL_LEN`] characters.
pub fn validate_label(label: &str) -> Result<(), CoreError> {
    if label.is_empty() {
        return Err(CoreError::Validation(
            "Annotation label must not be empty".to_string(),
        ));
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(CoreError::Validation(format!(
            "Annotation label must not exceed {MAX_LABEL_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a frame number. Frames are 0-indexed.
pub fn validate_frame_num(frame_num: i32) -> Result<(), CoreError> {
    if frame_num < 0 {
        return Err(CoreError::Validation(format!(
            "Frame number must not be negative, got {frame_num}"
        )));
    }
    Ok(())
}

/// Validate that a color string matches `#RRGGBB` or `#RRGGBBAA` hex format.
pub fn validate_color_hex(color: &str) -> Result<(), CoreError> {
    let valid_length = color.len() == 7 || color.len() == 9;

    if !valid_length {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB or #RRGGBBAA hex format"
        )));
    }

    if !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must start with '#'"
        )));
    }

    let hex_part = &color[1..];
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only hex digits after '#'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- kinds -------------------------------------------------------------

    #[test]
    fn known_kinds_accepted() {
        assert!(is_valid_kind("category"));
        assert!(is_valid_kind("marker"));
        assert!(validate_kind(KIND_CATEGORY).is_ok());
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = validate_kind("scribble").unwrap_err();
        assert!(err.to_string().contains("Invalid annotation kind"));
        assert!(!is_valid_kind(""));
    }

    // -- labels ------------------------------------------------------------

    #[test]
    fn valid_label_accepted() {
        assert!(validate_label("walking").is_ok());
    }

    #[test]
    fn empty_label_rejected() {
        assert!(validate_label("").is_err());
    }

    #[test]
    fn overlong_label_rejected() {
        let label = "x".repeat(MAX_LABEL_LEN + 1);
        assert!(validate_label(&label).is_err());
    }

    #[test]
    fn label_at_limit_accepted() {
        let label = "x".repeat(MAX_LABEL_LEN);
        assert!(validate_label(&label).is_ok());
    }

    // -- frame numbers -----------------------------------------------------

    #[test]
    fn frame_zero_accepted() {
        assert!(validate_frame_num(0).is_ok());
    }

    #[test]
    fn negative_frame_rejected() {
        assert!(validate_frame_num(-1).is_err());
    }

    // -- colors ------------------------------------------------------------

    #[test]
    fn color_hex_rrggbb_accepted() {
        assert!(validate_color_hex("#FF4444").is_ok());
        assert!(validate_color_hex("#aabbcc").is_ok());
    }

    #[test]
    fn color_hex_rrggbbaa_accepted() {
        assert!(validate_color_hex("#FF444480").is_ok());
    }

    #[test]
    fn color_hex_missing_hash_rejected() {
        assert!(validate_color_hex("FF44441").is_err());
    }

    #[test]
    fn color_hex_wrong_length_rejected() {
        assert!(validate_color_hex("#F44").is_err());
    }

    #[test]
    fn color_hex_invalid_chars_rejected() {
        assert!(validate_color_hex("#GGGGGG").is_err());
    }
}

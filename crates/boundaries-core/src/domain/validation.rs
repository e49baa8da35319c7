//! Field validation for catalog entities.
//!
//! Column widths mirror the storage schema so that a value rejected here
//! would also be rejected (or silently truncated) by a stricter store.

use thiserror::Error;

use crate::utils::slug::is_url_safe;

pub const MAX_SLUG_LEN: usize = 200;
pub const MAX_SET_NAME_LEN: usize = 100;
pub const MAX_SINGULAR_LEN: usize = 100;
pub const MAX_AUTHORITY_LEN: usize = 256;
pub const MAX_DOMAIN_LEN: usize = 256;
pub const MAX_EXTERNAL_ID_LEN: usize = 64;
pub const MAX_BOUNDARY_NAME_LEN: usize = 192;
pub const MAX_DISPLAY_NAME_LEN: usize = 256;

/// A catalog entity failed validation before reaching storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters, got {len}")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("Cannot derive a slug from name '{0}'")]
    EmptySlug(String),

    #[error("Slug '{0}' may only contain ASCII letters, digits, '-' and '_'")]
    InvalidSlug(String),

    #[error("Feature count cannot be negative, got {0}")]
    NegativeCount(i64),

    #[error("Metadata field names cannot contain '|': {0}")]
    InvalidMetadataField(String),

    #[error("Invalid geometry in {field}: {reason}")]
    Geometry { field: &'static str, reason: String },

    #[error("{field} must use SRID {expected}, got {found}")]
    SridMismatch {
        field: &'static str,
        expected: i32,
        found: i32,
    },

    #[error("simple_shape has {simple} vertices but shape only has {shape}")]
    SimplifiedShapeMoreDetailed { shape: usize, simple: usize },

    #[error("Boundary belongs to set '{expected}' but was paired with set '{found}'")]
    SetMismatch { expected: String, found: String },
}

/// Reject empty (after trimming) values.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Reject values longer than `max` characters.
pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }
    Ok(())
}

/// Validate a required, width-limited text field.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    require(field, value)?;
    max_len(field, value, max)
}

/// Validate a resolved slug: width-limited and usable in a URL as-is.
pub fn valid_slug(slug: &str) -> Result<(), ValidationError> {
    max_len("slug", slug, MAX_SLUG_LEN)?;
    if !is_url_safe(slug) {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(required_text("name", "Wards", MAX_SET_NAME_LEN).is_ok());
        assert_eq!(
            required_text("name", "   ", MAX_SET_NAME_LEN),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn test_max_len_counts_chars_not_bytes() {
        let accented = "é".repeat(10);
        assert!(max_len("name", &accented, 10).is_ok());
        assert_eq!(
            max_len("name", &accented, 9),
            Err(ValidationError::TooLong {
                field: "name",
                max: 9,
                len: 10
            })
        );
    }

    #[test]
    fn test_valid_slug() {
        assert!(valid_slug("wards").is_ok());
        assert_eq!(
            valid_slug("Ward 1/a"),
            Err(ValidationError::InvalidSlug("Ward 1/a".to_string()))
        );
        assert!(matches!(
            valid_slug(&"a".repeat(MAX_SLUG_LEN + 1)),
            Err(ValidationError::TooLong { field: "slug", .. })
        ));
    }
}

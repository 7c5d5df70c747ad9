//! Attribute names of a stored comment.
//!
//! The partition key is configurable, so it must never collide with one of
//! these names.

use super::{RepositoryError, Result};

pub const ATTR_NAME: &str = "name";
pub const ATTR_USER_COMMENT: &str = "user_comment";
pub const ATTR_TRANSCRIPTION: &str = "transcription";
pub const ATTR_SUMMARY: &str = "summary";
pub const ATTR_COMMENTS: &str = "comments";

/// Every non-key attribute a comment item may carry.
pub const COMMENT_ATTRIBUTES: &[&str] = &[
    ATTR_NAME,
    ATTR_USER_COMMENT,
    ATTR_TRANSCRIPTION,
    ATTR_SUMMARY,
    ATTR_COMMENTS,
];

/// A partition key name must be non-blank and distinct from every comment attribute.
pub fn validate_partition_key(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "Partition key name cannot be empty".to_string(),
        ));
    }
    if COMMENT_ATTRIBUTES.contains(&name) {
        return Err(RepositoryError::Validation(format!(
            "Partition key {name:?} collides with a comment attribute"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::UpdateField;

    #[test]
    fn test_reserved_names_are_rejected() {
        for name in COMMENT_ATTRIBUTES {
            assert!(
                matches!(
                    validate_partition_key(name),
                    Err(RepositoryError::Validation(_))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_blank_key_is_rejected() {
        assert!(validate_partition_key("").is_err());
        assert!(validate_partition_key("  ").is_err());
    }

    #[test]
    fn test_other_keys_are_accepted() {
        assert_eq!(validate_partition_key("id"), Ok(()));
        assert_eq!(validate_partition_key("comment_id"), Ok(()));
    }

    #[test]
    fn test_updatable_fields_are_comment_attributes() {
        for field in [
            UpdateField::UserComment,
            UpdateField::Transcription,
            UpdateField::Summary,
        ] {
            assert!(COMMENT_ATTRIBUTES.contains(&field.attribute_name()));
        }
    }
}

//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use usercomments_core::comment::{Annotation, Comment, CommentId};
use usercomments_core::storage::{
    RepositoryError, ATTR_COMMENTS, ATTR_NAME, ATTR_SUMMARY, ATTR_TRANSCRIPTION,
    ATTR_USER_COMMENT,
};

const ANNOTATION_TEXT: &str = "text";
const ANNOTATION_LABEL: &str = "label";
const ANNOTATION_START: &str = "start";
const ANNOTATION_END: &str = "end";

// ============================================================================
// Comment conversions
// ============================================================================

/// Convert a Comment to a DynamoDB item keyed by `partition_key`.
///
/// Absent attributes are left out of the item entirely.
pub fn comment_to_item(comment: &Comment, partition_key: &str) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        partition_key.to_string(),
        AttributeValue::S(comment.id.to_string()),
    );

    let optional = [
        (ATTR_NAME, &comment.name),
        (ATTR_USER_COMMENT, &comment.user_comment),
        (ATTR_TRANSCRIPTION, &comment.transcription),
        (ATTR_SUMMARY, &comment.summary),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            item.insert(key.to_string(), AttributeValue::S(value.clone()));
        }
    }

    if let Some(annotations) = &comment.comments {
        item.insert(
            ATTR_COMMENTS.to_string(),
            AttributeValue::L(annotations.iter().map(annotation_to_value).collect()),
        );
    }

    item
}

/// Convert a DynamoDB item keyed by `partition_key` to a Comment.
pub fn item_to_comment(
    item: &HashMap<String, AttributeValue>,
    partition_key: &str,
) -> Result<Comment, RepositoryError> {
    let id = CommentId::new(get_string(item, partition_key)?)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid {}: {}", partition_key, e)))?;

    let comments = match item.get(ATTR_COMMENTS) {
        Some(value) => Some(value_to_annotations(value)?),
        None => None,
    };

    Ok(Comment {
        id,
        name: get_optional_string(item, ATTR_NAME),
        user_comment: get_optional_string(item, ATTR_USER_COMMENT),
        transcription: get_optional_string(item, ATTR_TRANSCRIPTION),
        summary: get_optional_string(item, ATTR_SUMMARY),
        comments,
    })
}

// ============================================================================
// Annotation conversions
// ============================================================================

/// Convert an Annotation to a DynamoDB map value.
pub fn annotation_to_value(annotation: &Annotation) -> AttributeValue {
    let mut map = HashMap::new();
    map.insert(
        ANNOTATION_TEXT.to_string(),
        AttributeValue::S(annotation.text.clone()),
    );
    map.insert(
        ANNOTATION_LABEL.to_string(),
        AttributeValue::S(annotation.label.clone()),
    );
    map.insert(
        ANNOTATION_START.to_string(),
        AttributeValue::N(annotation.start.to_string()),
    );
    map.insert(
        ANNOTATION_END.to_string(),
        AttributeValue::N(annotation.end.to_string()),
    );
    AttributeValue::M(map)
}

/// Convert a DynamoDB list of maps to annotations.
pub fn value_to_annotations(value: &AttributeValue) -> Result<Vec<Annotation>, RepositoryError> {
    let list = value.as_l().map_err(|_| {
        RepositoryError::InvalidData(format!("Field {} is not a list", ATTR_COMMENTS))
    })?;

    list.iter()
        .map(|entry| -> Result<Annotation, RepositoryError> {
            let map = entry.as_m().map_err(|_| {
                RepositoryError::InvalidData(format!("Entry in {} is not a map", ATTR_COMMENTS))
            })?;
            Ok(Annotation {
                text: get_string(map, ANNOTATION_TEXT)?,
                label: get_string(map, ANNOTATION_LABEL)?,
                start: get_u32(map, ANNOTATION_START)?,
                end: get_u32(map, ANNOTATION_END)?,
            })
        })
        .collect()
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required non-negative integer attribute.
fn get_u32(item: &HashMap<String, AttributeValue>, key: &str) -> Result<u32, RepositoryError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;
    n.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}

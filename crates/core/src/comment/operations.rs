use super::error::CommentError;
use super::types::{Annotation, Comment, MAX_COMMENT_ID_BYTES};

/// Validates a raw comment id.
pub fn validate_comment_id(id: &str) -> Result<(), CommentError> {
    if id.trim().is_empty() {
        return Err(CommentError::EmptyId);
    }
    if id.len() > MAX_COMMENT_ID_BYTES {
        return Err(CommentError::IdTooLong {
            max: MAX_COMMENT_ID_BYTES,
            actual: id.len(),
        });
    }
    Ok(())
}

/// Validates a single annotation.
pub fn validate_annotation(annotation: &Annotation) -> Result<(), CommentError> {
    if annotation.text.trim().is_empty() {
        return Err(CommentError::EmptyAnnotationText);
    }
    if annotation.start > annotation.end {
        return Err(CommentError::InvertedSpan {
            start: annotation.start,
            end: annotation.end,
        });
    }
    Ok(())
}

/// Validates a comment before it is written.
pub fn validate_comment(comment: &Comment) -> Result<(), CommentError> {
    validate_comment_id(comment.id.as_str())?;
    for annotation in comment.comments.iter().flatten() {
        validate_annotation(annotation)?;
    }
    Ok(())
}

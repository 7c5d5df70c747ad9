use thiserror::Error;

/// Errors that can occur when validating comments and comment requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommentError {
    #[error("Comment id cannot be empty")]
    EmptyId,
    #[error("Comment id too long (max {max} bytes, got {actual})")]
    IdTooLong { max: usize, actual: usize },
    #[error("Annotation text cannot be empty")]
    EmptyAnnotationText,
    #[error("Annotation span is inverted: start {start} is after end {end}")]
    InvertedSpan { start: u32, end: u32 },
    #[error("Update must set at least one of: user_comment, transcription, summary")]
    EmptyUpdate,
}

//! Request types for comment operations.
//!
//! Pure data with no I/O, shared by the storage backends and the CLI.

use super::error::CommentError;
use super::operations::validate_comment;
use super::types::{Annotation, Comment, CommentId};

/// Request payload for storing a comment.
#[derive(Debug, Clone)]
pub struct CreateCommentRequest {
    pub id: String,
    pub name: Option<String>,
    pub user_comment: Option<String>,
    pub transcription: Option<String>,
    pub summary: Option<String>,
    pub comments: Option<Vec<Annotation>>,
}

impl CreateCommentRequest {
    /// Create a new request with just an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            user_comment: None,
            transcription: None,
            summary: None,
            comments: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_comment(mut self, user_comment: impl Into<String>) -> Self {
        self.user_comment = Some(user_comment.into());
        self
    }

    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.comments.get_or_insert_with(Vec::new).push(annotation);
        self
    }

    /// Convert into a validated Comment.
    pub fn into_comment(self) -> Result<Comment, CommentError> {
        let comment = Comment {
            id: CommentId::new(self.id)?,
            name: self.name,
            user_comment: self.user_comment,
            transcription: self.transcription,
            summary: self.summary,
            comments: self.comments,
        };
        validate_comment(&comment)?;
        Ok(comment)
    }
}

/// Attributes an update is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateField {
    UserComment,
    Transcription,
    Summary,
}

impl UpdateField {
    /// Stored attribute name.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            UpdateField::UserComment => "user_comment",
            UpdateField::Transcription => "transcription",
            UpdateField::Summary => "summary",
        }
    }
}

/// Partial update of a stored comment.
///
/// A field is supplied when it is present and not blank; blank strings are
/// treated the same as absent ones. Fields that are not supplied are left
/// untouched in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    pub user_comment: Option<String>,
    pub transcription: Option<String>,
    pub summary: Option<String>,
}

impl UpdateCommentRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_comment(mut self, user_comment: impl Into<String>) -> Self {
        self.user_comment = Some(user_comment.into());
        self
    }

    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Supplied fields in a stable order, blank values skipped.
    pub fn supplied_fields(&self) -> Vec<(UpdateField, &str)> {
        [
            (UpdateField::UserComment, &self.user_comment),
            (UpdateField::Transcription, &self.transcription),
            (UpdateField::Summary, &self.summary),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (field, v))
        })
        .collect()
    }

    /// Returns true when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.supplied_fields().is_empty()
    }

    /// Rejects updates that would not touch any attribute.
    pub fn validate(&self) -> Result<(), CommentError> {
        if self.is_empty() {
            return Err(CommentError::EmptyUpdate);
        }
        Ok(())
    }

    /// Apply the supplied fields to an existing comment.
    pub fn apply_to(&self, comment: &mut Comment) {
        for (field, value) in self.supplied_fields() {
            let slot = match field {
                UpdateField::UserComment => &mut comment.user_comment,
                UpdateField::Transcription => &mut comment.transcription,
                UpdateField::Summary => &mut comment.summary,
            };
            *slot = Some(value.to_string());
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CommentError;
use super::operations::validate_comment_id;

/// Upper bound for a comment id, in bytes.
///
/// DynamoDB accepts string partition keys up to 2048 bytes.
pub const MAX_COMMENT_ID_BYTES: usize = 1024;

/// Identifier of a stored comment. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Creates a new id, rejecting blank or oversized values.
    pub fn new(id: impl Into<String>) -> Result<Self, CommentError> {
        let id = id.into();
        validate_comment_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommentId {
    type Err = CommentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CommentId {
    type Error = CommentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}

/// A highlighted span of the transcription with a remark attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The highlighted passage.
    pub text: String,
    /// Classification or remark attached to the passage.
    pub label: String,
    /// Start offset of the highlight (inclusive).
    pub start: u32,
    /// End offset of the highlight (exclusive).
    pub end: u32,
}

impl Annotation {
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
        }
    }
}

/// A user comment on a transcribed recording.
///
/// Every attribute except `id` is optional. Absent attributes are not
/// written to the store, so a stored comment reads back exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Annotation>>,
}

impl Comment {
    /// Creates a comment with no attributes besides its id.
    pub fn new(id: CommentId) -> Self {
        Self {
            id,
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

    /// Appends an annotation, creating the list if needed.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.comments.get_or_insert_with(Vec::new).push(annotation);
        self
    }
}

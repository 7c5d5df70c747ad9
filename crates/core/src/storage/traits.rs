use async_trait::async_trait;

use crate::comment::{Annotation, Comment, CommentId, UpdateCommentRequest};

use super::{Result, TableConfig, TableState};

/// Repository for comment operations.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a comment, replacing any comment with the same id.
    async fn add_comment(&self, comment: &Comment) -> Result<()>;

    /// Gets a comment by its id. A missing comment is `Ok(None)`.
    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>>;

    /// Merges the supplied fields into an existing comment.
    ///
    /// Fails with `Validation` when no field is supplied and with `NotFound`
    /// when no comment has the given id.
    async fn update_comment(&self, id: &CommentId, update: &UpdateCommentRequest) -> Result<()>;

    /// Appends an annotation to the end of a comment's annotation list,
    /// creating the list if the comment has none.
    ///
    /// Fails with `Validation` for an invalid annotation and with `NotFound`
    /// when no comment has the given id.
    async fn append_annotation(&self, id: &CommentId, annotation: &Annotation) -> Result<()>;
}

/// Creates and inspects the table comments are stored in.
#[async_trait]
pub trait TableProvisioner: Send + Sync {
    /// Creates the table and waits until it is active.
    ///
    /// Fails with `TableAlreadyExists` when a table with the same name exists.
    async fn ensure_table(&self, config: &TableConfig) -> Result<()>;

    /// Gets the current state of a table, `None` if it does not exist.
    async fn describe_table(&self, table_name: &str) -> Result<Option<TableState>>;
}

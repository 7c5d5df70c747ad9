//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use usercomments_core::comment::{
    validate_annotation, validate_comment, Annotation, Comment, CommentId, UpdateCommentRequest,
};
use usercomments_core::storage::{
    CommentRepository, RepositoryError, Result, TableConfig, TableProvisioner, TableState,
    TableStatus,
};

/// In-memory storage backend for testing.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
/// Tables become active as soon as they are created.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    comments: Arc<RwLock<HashMap<CommentId, Comment>>>,
    tables: Arc<RwLock<HashMap<String, TableState>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            comments: Arc::new(RwLock::new(HashMap::new())),
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn add_comment(&self, comment: &Comment) -> Result<()> {
        validate_comment(comment)?;
        let mut comments = self.comments.write().await;
        comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments.get(id).cloned())
    }

    async fn update_comment(&self, id: &CommentId, update: &UpdateCommentRequest) -> Result<()> {
        update.validate()?;
        let mut comments = self.comments.write().await;
        let comment = comments.get_mut(id).ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Comment",
            id: id.to_string(),
        })?;
        update.apply_to(comment);
        Ok(())
    }

    async fn append_annotation(&self, id: &CommentId, annotation: &Annotation) -> Result<()> {
        validate_annotation(annotation)?;
        let mut comments = self.comments.write().await;
        let comment = comments.get_mut(id).ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Comment",
            id: id.to_string(),
        })?;
        comment
            .comments
            .get_or_insert_with(Vec::new)
            .push(annotation.clone());
        Ok(())
    }
}

#[async_trait]
impl TableProvisioner for InMemoryRepository {
    async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
        config.validate()?;
        let mut tables = self.tables.write().await;
        if tables.contains_key(&config.table_name) {
            return Err(RepositoryError::TableAlreadyExists {
                table_name: config.table_name.clone(),
            });
        }
        tables.insert(
            config.table_name.clone(),
            TableState {
                table_name: config.table_name.clone(),
                status: TableStatus::Active,
            },
        );
        Ok(())
    }

    async fn describe_table(&self, table_name: &str) -> Result<Option<TableState>> {
        let tables = self.tables.read().await;
        Ok(tables.get(table_name).cloned())
    }
}

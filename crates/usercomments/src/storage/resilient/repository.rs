//! Resilient repository decorator.

use std::sync::Arc;

use async_trait::async_trait;

use usercomments_core::comment::{Annotation, Comment, CommentId, UpdateCommentRequest};
use usercomments_core::storage::{
    CommentRepository, RepositoryError, Result, TableConfig, TableProvisioner, TableState,
};

use super::retry::RetryPolicy;

/// Retrying repository decorator.
///
/// Item operations run under the policy's per-attempt timeout. Table creation
/// runs without one.
///
/// Idempotent operations are retried on any transient error. Table creation
/// and annotation appends are retried only when throttled: an unavailable
/// store or a timeout may have applied the first attempt, and repeating it
/// would report a spurious conflict or append the annotation twice.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
pub struct ResilientRepository<R> {
    repository: Arc<R>,
    policy: RetryPolicy,
}

impl<R> ResilientRepository<R> {
    /// Creates a new resilient repository.
    pub fn new(repository: Arc<R>, policy: RetryPolicy) -> Self {
        Self { repository, policy }
    }
}

#[async_trait]
impl<R> CommentRepository for ResilientRepository<R>
where
    R: CommentRepository + 'static,
{
    async fn add_comment(&self, comment: &Comment) -> Result<()> {
        self.policy
            .run("add_comment", self.policy.timeout, || {
                self.repository.add_comment(comment)
            })
            .await
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>> {
        self.policy
            .run("get_comment", self.policy.timeout, || {
                self.repository.get_comment(id)
            })
            .await
    }

    async fn update_comment(&self, id: &CommentId, update: &UpdateCommentRequest) -> Result<()> {
        self.policy
            .run("update_comment", self.policy.timeout, || {
                self.repository.update_comment(id, update)
            })
            .await
    }

    async fn append_annotation(&self, id: &CommentId, annotation: &Annotation) -> Result<()> {
        self.policy
            .run_with(
                "append_annotation",
                self.policy.timeout,
                RepositoryError::is_throttled,
                || self.repository.append_annotation(id, annotation),
            )
            .await
    }
}

#[async_trait]
impl<R> TableProvisioner for ResilientRepository<R>
where
    R: TableProvisioner + 'static,
{
    async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
        self.policy
            .run_with("ensure_table", None, RepositoryError::is_throttled, || {
                self.repository.ensure_table(config)
            })
            .await
    }

    async fn describe_table(&self, table_name: &str) -> Result<Option<TableState>> {
        self.policy
            .run("describe_table", self.policy.timeout, || {
                self.repository.describe_table(table_name)
            })
            .await
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::storage::inmemory::InMemoryRepository;
    use usercomments_core::storage::comments_table_config;

    /// Fails the first `failures` calls of every operation with `error`.
    struct FlakyRepository {
        inner: InMemoryRepository,
        failures: u32,
        error: RepositoryError,
        calls: AtomicU32,
    }

    impl FlakyRepository {
        fn new(failures: u32, error: RepositoryError) -> Self {
            Self {
                inner: InMemoryRepository::new(),
                failures,
                error,
                calls: AtomicU32::new(0),
            }
        }

        fn check(&self) -> Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(self.error.clone());
            }
            Ok(())
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommentRepository for FlakyRepository {
        async fn add_comment(&self, comment: &Comment) -> Result<()> {
            self.check()?;
            self.inner.add_comment(comment).await
        }

        async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>> {
            self.check()?;
            self.inner.get_comment(id).await
        }

        async fn update_comment(
            &self,
            id: &CommentId,
            update: &UpdateCommentRequest,
        ) -> Result<()> {
            self.check()?;
            self.inner.update_comment(id, update).await
        }

        async fn append_annotation(&self, id: &CommentId, annotation: &Annotation) -> Result<()> {
            self.check()?;
            self.inner.append_annotation(id, annotation).await
        }
    }

    #[async_trait]
    impl TableProvisioner for FlakyRepository {
        async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
            self.check()?;
            self.inner.ensure_table(config).await
        }

        async fn describe_table(&self, table_name: &str) -> Result<Option<TableState>> {
            self.check()?;
            self.inner.describe_table(table_name).await
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::default().with_base_delay(Duration::from_millis(1))
    }

    fn comment() -> Comment {
        Comment::new(CommentId::new("1").unwrap()).with_user_comment("hello")
    }

    #[tokio::test]
    async fn test_throttled_write_is_retried() {
        let flaky = Arc::new(FlakyRepository::new(
            2,
            RepositoryError::Throttled("slow down".to_string()),
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());

        repo.add_comment(&comment()).await.unwrap();

        assert_eq!(flaky.calls(), 3);
        assert!(flaky.inner.get_comment(&comment().id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_after_retries() {
        let flaky = Arc::new(FlakyRepository::new(
            10,
            RepositoryError::StoreUnavailable("down".to_string()),
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());

        let result = repo.get_comment(&comment().id).await;

        assert!(matches!(result, Err(RepositoryError::StoreUnavailable(_))));
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let flaky = Arc::new(FlakyRepository::new(0, RepositoryError::Throttled(String::new())));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        let update = UpdateCommentRequest::new().with_summary("s");

        let result = repo.update_comment(&comment().id, &update).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert_eq!(flaky.calls(), 1);
    }

    #[tokio::test]
    async fn test_table_conflict_is_not_retried() {
        let flaky = Arc::new(FlakyRepository::new(0, RepositoryError::Throttled(String::new())));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        let config = comments_table_config();

        repo.ensure_table(&config).await.unwrap();
        let result = repo.ensure_table(&config).await;

        assert!(matches!(
            result,
            Err(RepositoryError::TableAlreadyExists { .. })
        ));
        assert_eq!(flaky.calls(), 2);
    }

    #[tokio::test]
    async fn test_transient_table_creation_is_retried() {
        let flaky = Arc::new(FlakyRepository::new(
            1,
            RepositoryError::Throttled("limit".to_string()),
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        let config = comments_table_config();

        repo.ensure_table(&config).await.unwrap();

        assert!(repo
            .describe_table(&config.table_name)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_unavailable_table_creation_is_not_retried() {
        let flaky = Arc::new(FlakyRepository::new(
            1,
            RepositoryError::StoreUnavailable("connection reset".to_string()),
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        let config = comments_table_config();

        let result = repo.ensure_table(&config).await;

        assert!(matches!(result, Err(RepositoryError::StoreUnavailable(_))));
        assert_eq!(flaky.calls(), 1);
    }

    #[tokio::test]
    async fn test_throttled_append_is_retried() {
        let flaky = Arc::new(FlakyRepository::new(
            1,
            RepositoryError::Throttled("slow down".to_string()),
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        flaky.inner.add_comment(&comment()).await.unwrap();

        repo.append_annotation(&comment().id, &Annotation::new("hello", "greeting", 0, 5))
            .await
            .unwrap();

        assert_eq!(flaky.calls(), 2);
        let stored = flaky.inner.get_comment(&comment().id).await.unwrap().unwrap();
        assert_eq!(stored.comments.map(|c| c.len()), Some(1));
    }

    #[tokio::test]
    async fn test_timed_out_append_is_not_repeated() {
        let flaky = Arc::new(FlakyRepository::new(
            1,
            RepositoryError::Timeout {
                operation: "append_annotation",
                after: Duration::from_millis(10),
            },
        ));
        let repo = ResilientRepository::new(flaky.clone(), policy());
        flaky.inner.add_comment(&comment()).await.unwrap();

        let result = repo
            .append_annotation(&comment().id, &Annotation::new("hello", "greeting", 0, 5))
            .await;

        assert!(matches!(result, Err(RepositoryError::Timeout { .. })));
        assert_eq!(flaky.calls(), 1);
    }
}

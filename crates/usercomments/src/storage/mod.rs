//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `usercomments_core::storage`. Backends are compiled in via
//! feature flags and selected at runtime through [`Config::backend`].
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): process-local backend for tests and dry runs
//!
//! Every backend is wrapped in [`ResilientRepository`], which owns retries and
//! per-attempt timeouts.

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'dynamodb' or 'inmemory' feature. \
    Example: cargo build -p usercomments --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

pub mod resilient;

use std::sync::Arc;

use usercomments_core::storage::{CommentRepository, TableProvisioner};

use crate::config::{Backend, Config, ConfigError};

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
pub use resilient::{ResilientRepository, RetryPolicy};

/// Handles to the configured backend.
///
/// Both handles point at the same underlying repository.
#[derive(Clone)]
pub struct Store {
    pub comments: Arc<dyn CommentRepository>,
    pub tables: Arc<dyn TableProvisioner>,
}

impl Store {
    /// Wraps a repository implementing both traits with the given retry policy.
    pub fn new<R>(repository: R, policy: RetryPolicy) -> Self
    where
        R: CommentRepository + TableProvisioner + 'static,
    {
        let resilient = Arc::new(ResilientRepository::new(Arc::new(repository), policy));
        Self {
            comments: resilient.clone(),
            tables: resilient,
        }
    }
}

/// Opens the backend named in the configuration.
pub async fn open_store(config: &Config) -> Result<Store, ConfigError> {
    config.validate()?;
    let policy = config.retry_policy();
    match config.backend {
        #[cfg(feature = "dynamodb")]
        Backend::Dynamodb => {
            tracing::debug!(store = %config.target_display(), "Opening DynamoDB store");
            Ok(Store::new(
                DynamoDbRepository::from_config(config).await,
                policy,
            ))
        }
        #[cfg(not(feature = "dynamodb"))]
        Backend::Dynamodb => Err(ConfigError::BackendUnavailable("dynamodb")),

        #[cfg(feature = "inmemory")]
        Backend::Memory => {
            tracing::debug!("Opening in-memory store");
            Ok(Store::new(InMemoryRepository::new(), policy))
        }
        #[cfg(not(feature = "inmemory"))]
        Backend::Memory => Err(ConfigError::BackendUnavailable("inmemory")),
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use usercomments_core::comment::{Comment, CommentId};
    use usercomments_core::storage::comments_table_config;

    #[tokio::test]
    async fn test_open_memory_store_shares_state() {
        let config = Config {
            backend: Backend::Memory,
            ..Config::default()
        };
        let store = open_store(&config).await.unwrap();

        store.tables.ensure_table(&config.table_config()).await.unwrap();
        assert!(store
            .tables
            .describe_table(&comments_table_config().table_name)
            .await
            .unwrap()
            .is_some());

        let comment = Comment::new(CommentId::new("1").unwrap());
        store.comments.add_comment(&comment).await.unwrap();
        assert_eq!(
            store.comments.get_comment(&comment.id).await.unwrap(),
            Some(comment)
        );
    }

    #[tokio::test]
    async fn test_open_store_rejects_reserved_partition_key() {
        let config = Config {
            backend: Backend::Memory,
            partition_key: "summary".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            open_store(&config).await,
            Err(ConfigError::InvalidValue {
                var: "COMMENTS_PARTITION_KEY",
                ..
            })
        ));
    }
}

use std::time::Duration;

use thiserror::Error;

use crate::comment::CommentError;

/// Errors that can occur during repository and provisioning operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Table already exists: {table_name}")]
    TableAlreadyExists { table_name: String },
    #[error("Provisioning failed: {0}")]
    Provisioning(String),
    #[error("Timed out waiting for table {table_name} to become active")]
    ActivationTimeout { table_name: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RepositoryError::Throttled(_)
                | RepositoryError::StoreUnavailable(_)
                | RepositoryError::Timeout { .. }
        )
    }

    /// Whether the store refused the request without applying it.
    pub fn is_throttled(&self) -> bool {
        matches!(self, RepositoryError::Throttled(_))
    }

    /// Whether the error came from creating or activating a table.
    pub fn is_provisioning(&self) -> bool {
        matches!(
            self,
            RepositoryError::TableAlreadyExists { .. }
                | RepositoryError::Provisioning(_)
                | RepositoryError::ActivationTimeout { .. }
        )
    }
}

impl From<CommentError> for RepositoryError {
    fn from(err: CommentError) -> Self {
        RepositoryError::Validation(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Comment",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Comment not found: abc-123");
    }

    #[test]
    fn test_table_already_exists_display() {
        let error = RepositoryError::TableAlreadyExists {
            table_name: "User_Comments".to_string(),
        };
        assert_eq!(error.to_string(), "Table already exists: User_Comments");
    }

    #[test]
    fn test_timeout_display() {
        let error = RepositoryError::Timeout {
            operation: "GetItem",
            after: Duration::from_millis(250),
        };
        assert_eq!(error.to_string(), "GetItem timed out after 250ms");
    }

    #[test]
    fn test_transient_classification() {
        assert!(RepositoryError::Throttled("slow down".to_string()).is_transient());
        assert!(RepositoryError::StoreUnavailable("reset".to_string()).is_transient());
        assert!(RepositoryError::Timeout {
            operation: "PutItem",
            after: Duration::from_secs(1),
        }
        .is_transient());

        assert!(!RepositoryError::Validation("bad".to_string()).is_transient());
        assert!(!RepositoryError::TableAlreadyExists {
            table_name: "t".to_string()
        }
        .is_transient());
        assert!(!RepositoryError::QueryFailed("Table not found".to_string()).is_transient());
    }

    #[test]
    fn test_only_throttling_is_known_unapplied() {
        assert!(RepositoryError::Throttled("slow down".to_string()).is_throttled());
        assert!(!RepositoryError::StoreUnavailable("reset".to_string()).is_throttled());
        assert!(!RepositoryError::Timeout {
            operation: "UpdateItem",
            after: Duration::from_secs(1),
        }
        .is_throttled());
    }

    #[test]
    fn test_provisioning_classification() {
        assert!(RepositoryError::Provisioning("denied".to_string()).is_provisioning());
        assert!(RepositoryError::ActivationTimeout {
            table_name: "t".to_string()
        }
        .is_provisioning());
        assert!(!RepositoryError::Throttled("x".to_string()).is_provisioning());
    }

    #[test]
    fn test_comment_error_becomes_validation() {
        let error: RepositoryError = CommentError::EmptyUpdate.into();
        assert_eq!(
            error,
            RepositoryError::Validation(
                "Update must set at least one of: user_comment, transcription, summary"
                    .to_string()
            )
        );
    }
}

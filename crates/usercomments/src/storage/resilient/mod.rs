//! Resilient repository decorator.
//!
//! Wraps any repository implementation with a retry policy:
//!
//! - **Transient errors** (`Throttled`, `StoreUnavailable`, `Timeout`) are retried
//!   with exponential backoff
//! - **Everything else** is returned to the caller unchanged
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(DynamoDbRepository::from_config(&config).await);
//! let resilient = ResilientRepository::new(repo, RetryPolicy::default());
//! ```

mod repository;
mod retry;

pub use repository::ResilientRepository;
pub use retry::{
    RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY, DEFAULT_TIMEOUT,
};

//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository traits
//! that stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. Useful for
//! tests and for running the CLI without AWS access.
//!
//! # Example
//!
//! ```rust,ignore
//! use usercomments::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.ensure_table(&comments_table_config()).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;

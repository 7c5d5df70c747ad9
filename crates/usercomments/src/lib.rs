//! usercomments - store, fetch and patch user comments in DynamoDB.
//!
//! The pure domain lives in `usercomments_core`; this crate adds the storage
//! backends, configuration and the CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod storage;

pub use config::{Backend, Config, ConfigError};
pub use storage::{open_store, Store};

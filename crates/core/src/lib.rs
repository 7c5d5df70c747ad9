//! Core domain types and storage contracts for usercomments.
//!
//! Everything in this crate is pure: data types, validation, request types
//! and the repository traits. Backends live in the `usercomments` crate.

pub mod comment;
pub mod storage;

//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`. Items live in a single table keyed by a string
//! partition key (`id` unless configured otherwise).

mod client;
mod conversions;
mod error;
mod provisioner;
mod repository;

pub use client::create_client;
pub use repository::DynamoDbRepository;

use std::{env, fmt, str::FromStr, time::Duration};

use clap::ValueEnum;
use usercomments_core::storage::{
    validate_partition_key, BillingMode, TableConfig, DEFAULT_CAPACITY_UNITS,
    DEFAULT_PARTITION_KEY, DEFAULT_TABLE_NAME,
};

use crate::storage::RetryPolicy;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-2";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Storage backend '{0}' is not compiled in; rebuild with the '{0}' feature")]
    BackendUnavailable(&'static str),
}

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// AWS DynamoDB.
    #[default]
    Dynamodb,
    /// Process-local maps; nothing survives the process.
    #[value(alias = "inmemory")]
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Dynamodb => f.write_str("dynamodb"),
            Backend::Memory => f.write_str("memory"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage backend (default: dynamodb)
    pub backend: Backend,
    /// AWS region (default: "us-east-2")
    pub region: String,
    /// Endpoint override, e.g. a local DynamoDB
    pub endpoint_url: Option<String>,
    /// Table holding the comments (default: "User_Comments")
    pub table_name: String,
    /// Partition key attribute name (default: "id")
    pub partition_key: String,
    /// Billing mode used when creating the table (default: provisioned 5/5)
    pub billing_mode: BillingMode,
    /// Per-attempt timeout for item operations (default: 10s)
    pub request_timeout: Duration,
    /// Attempts per operation, including the first (default: 3)
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            backend: Backend::default(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            partition_key: DEFAULT_PARTITION_KEY.to_string(),
            billing_mode: BillingMode::default(),
            request_timeout: policy.timeout.unwrap_or_default(),
            max_attempts: policy.max_attempts,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMMENTS_BACKEND` - `dynamodb` or `memory` (default: dynamodb)
    /// - `AWS_REGION` - AWS region (default: "us-east-2")
    /// - `AWS_ENDPOINT_URL` - endpoint override (default: none)
    /// - `COMMENTS_TABLE_NAME` - table name (default: "User_Comments")
    /// - `COMMENTS_PARTITION_KEY` - partition key attribute (default: "id")
    /// - `COMMENTS_BILLING_MODE` - `provisioned` or `pay-per-request` (default: provisioned)
    /// - `COMMENTS_READ_CAPACITY` / `COMMENTS_WRITE_CAPACITY` - provisioned units (default: 5)
    /// - `COMMENTS_TIMEOUT_MS` - per-attempt timeout in milliseconds (default: 10000)
    /// - `COMMENTS_MAX_ATTEMPTS` - attempts per operation (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("COMMENTS_BACKEND") {
            Some(value) => parse_with(&value, "COMMENTS_BACKEND", |s| {
                <Backend as ValueEnum>::from_str(s.trim(), true)
            })?,
            None => defaults.backend,
        };

        let read_capacity = parse_number(get("COMMENTS_READ_CAPACITY"), "COMMENTS_READ_CAPACITY")?
            .unwrap_or(DEFAULT_CAPACITY_UNITS);
        let write_capacity =
            parse_number(get("COMMENTS_WRITE_CAPACITY"), "COMMENTS_WRITE_CAPACITY")?
                .unwrap_or(DEFAULT_CAPACITY_UNITS);
        let billing_mode = match get("COMMENTS_BILLING_MODE") {
            Some(value) => parse_billing_mode(&value, read_capacity, write_capacity)?,
            None => BillingMode::Provisioned {
                read_capacity_units: read_capacity,
                write_capacity_units: write_capacity,
            },
        };

        let request_timeout = parse_number::<u64>(get("COMMENTS_TIMEOUT_MS"), "COMMENTS_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        let max_attempts = parse_number::<u32>(get("COMMENTS_MAX_ATTEMPTS"), "COMMENTS_MAX_ATTEMPTS")?
            .unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                var: "COMMENTS_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let config = Self {
            backend,
            region: get("AWS_REGION").unwrap_or(defaults.region),
            endpoint_url: get("AWS_ENDPOINT_URL"),
            table_name: get("COMMENTS_TABLE_NAME").unwrap_or(defaults.table_name),
            partition_key: get("COMMENTS_PARTITION_KEY").unwrap_or(defaults.partition_key),
            billing_mode,
            request_timeout,
            max_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects a partition key that would collide with a comment attribute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_partition_key(&self.partition_key).map_err(|e| ConfigError::InvalidValue {
            var: "COMMENTS_PARTITION_KEY",
            value: self.partition_key.clone(),
            reason: e.to_string(),
        })
    }

    /// Table schema derived from this configuration.
    pub fn table_config(&self) -> TableConfig {
        TableConfig::new(&self.table_name, &self.partition_key)
            .with_billing_mode(self.billing_mode)
    }

    /// Retry policy derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_timeout(Some(self.request_timeout))
    }

    /// Human-readable description of where data goes.
    pub fn target_display(&self) -> String {
        match (self.backend, &self.endpoint_url) {
            (Backend::Memory, _) => "in-memory store".to_string(),
            (Backend::Dynamodb, Some(endpoint)) => {
                format!("DynamoDB at {} ({})", endpoint, self.region)
            }
            (Backend::Dynamodb, None) => format!("AWS DynamoDB ({})", self.region),
        }
    }
}

/// Parse a billing mode name; capacity only applies to provisioned mode.
pub fn parse_billing_mode(
    value: &str,
    read_capacity_units: i64,
    write_capacity_units: i64,
) -> Result<BillingMode, ConfigError> {
    match value.to_ascii_lowercase().replace('_', "-").as_str() {
        "provisioned" => Ok(BillingMode::Provisioned {
            read_capacity_units,
            write_capacity_units,
        }),
        "pay-per-request" | "on-demand" => Ok(BillingMode::PayPerRequest),
        _ => Err(ConfigError::InvalidValue {
            var: "COMMENTS_BILLING_MODE",
            value: value.to_string(),
            reason: "expected 'provisioned' or 'pay-per-request'".to_string(),
        }),
    }
}

fn parse_number<T>(value: Option<String>, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .map(|v| parse_with(&v, var, |s| s.trim().parse::<T>()))
        .transpose()
}

fn parse_with<T, E, P>(value: &str, var: &'static str, parse: P) -> Result<T, ConfigError>
where
    E: fmt::Display,
    P: FnOnce(&str) -> Result<T, E>,
{
    parse(value).map_err(|e| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

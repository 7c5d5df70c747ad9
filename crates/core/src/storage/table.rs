//! Table schema configuration (pure data).

use std::fmt;

use serde::Serialize;

use super::{validate_partition_key, RepositoryError, Result};

/// Default table name used by the reference deployment.
pub const DEFAULT_TABLE_NAME: &str = "User_Comments";

/// Default partition key attribute.
pub const DEFAULT_PARTITION_KEY: &str = "id";

/// Default provisioned throughput, for both reads and writes.
pub const DEFAULT_CAPACITY_UNITS: i64 = 5;

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// Key attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    Provisioned {
        read_capacity_units: i64,
        write_capacity_units: i64,
    },
    PayPerRequest,
}

impl Default for BillingMode {
    fn default() -> Self {
        BillingMode::Provisioned {
            read_capacity_units: DEFAULT_CAPACITY_UNITS,
            write_capacity_units: DEFAULT_CAPACITY_UNITS,
        }
    }
}

impl TableConfig {
    /// Creates a config with a string partition key and default capacity.
    pub fn new(table_name: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: KeyAttribute {
                name: partition_key.into(),
                attribute_type: AttributeType::String,
            },
            billing_mode: BillingMode::default(),
        }
    }

    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the billing mode.
    pub fn with_billing_mode(mut self, billing_mode: BillingMode) -> Self {
        self.billing_mode = billing_mode;
        self
    }

    /// Checks table name, key name and capacity against DynamoDB's rules.
    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.table_name)?;
        validate_partition_key(&self.partition_key.name)?;
        if let BillingMode::Provisioned {
            read_capacity_units,
            write_capacity_units,
        } = self.billing_mode
        {
            if read_capacity_units < 1 || write_capacity_units < 1 {
                return Err(RepositoryError::Validation(format!(
                    "Capacity units must be at least 1 (read: {read_capacity_units}, write: {write_capacity_units})"
                )));
            }
        }
        Ok(())
    }
}

/// Returns the canonical table configuration for comments.
pub fn comments_table_config() -> TableConfig {
    TableConfig::new(DEFAULT_TABLE_NAME, DEFAULT_PARTITION_KEY)
}

/// Table names are 3-255 characters of `[A-Za-z0-9_.-]`.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 255 {
        return Err(RepositoryError::Validation(format!(
            "Table name must be 3-255 characters long: {name:?}"
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(RepositoryError::Validation(format!(
            "Table name contains invalid character {c:?}: {name:?}"
        )));
    }
    Ok(())
}

/// Format a table config for display.
pub fn format_table_config(config: &TableConfig) -> Vec<String> {
    let mut lines = vec![
        format!("+ Create table: {}", config.table_name),
        format!("  Partition key: {} (S)", config.partition_key.name),
    ];
    match config.billing_mode {
        BillingMode::Provisioned {
            read_capacity_units,
            write_capacity_units,
        } => lines.push(format!(
            "  Billing: PROVISIONED (read: {read_capacity_units}, write: {write_capacity_units})"
        )),
        BillingMode::PayPerRequest => lines.push("  Billing: PAY_PER_REQUEST".to_string()),
    }
    lines
}

/// Current state of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableState {
    pub table_name: String,
    pub status: TableStatus,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Creating,
    Active,
    Updating,
    Deleting,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableStatus::Creating => "CREATING",
            TableStatus::Active => "ACTIVE",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_table_config_defaults() {
        let config = comments_table_config();

        assert_eq!(config.table_name, "User_Comments");
        assert_eq!(config.partition_key.name, "id");
        assert_eq!(config.partition_key.attribute_type, AttributeType::String);
        assert_eq!(
            config.billing_mode,
            BillingMode::Provisioned {
                read_capacity_units: 5,
                write_capacity_units: 5
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_table_name() {
        let config = comments_table_config().with_table_name("UserComments");
        assert_eq!(config.table_name, "UserComments");
    }

    #[test]
    fn test_validate_table_name_length() {
        assert!(validate_table_name("ab").is_err());
        assert!(validate_table_name("abc").is_ok());
        assert!(validate_table_name(&"a".repeat(255)).is_ok());
        assert!(validate_table_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_table_name_characters() {
        assert!(validate_table_name("User_Comments.v1-test").is_ok());
        assert!(matches!(
            validate_table_name("User Comments"),
            Err(RepositoryError::Validation(_))
        ));
        assert!(validate_table_name("comments#1").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = TableConfig::new("User_Comments", " ");
        assert!(matches!(
            config.validate(),
            Err(RepositoryError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_key_named_like_an_attribute() {
        let config = TableConfig::new("User_Comments", "name");
        assert!(matches!(
            config.validate(),
            Err(RepositoryError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = comments_table_config().with_billing_mode(BillingMode::Provisioned {
            read_capacity_units: 0,
            write_capacity_units: 5,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_provisioned_config() {
        let lines = format_table_config(&comments_table_config());
        assert_eq!(
            lines,
            vec![
                "+ Create table: User_Comments".to_string(),
                "  Partition key: id (S)".to_string(),
                "  Billing: PROVISIONED (read: 5, write: 5)".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_pay_per_request_config() {
        let config = TableConfig::new("UserComments", "comment_id")
            .with_billing_mode(BillingMode::PayPerRequest);
        let lines = format_table_config(&config);
        assert_eq!(lines[1], "  Partition key: comment_id (S)");
        assert_eq!(lines[2], "  Billing: PAY_PER_REQUEST");
    }

    #[test]
    fn test_table_status_display() {
        assert_eq!(TableStatus::Active.to_string(), "ACTIVE");
        assert_eq!(TableStatus::Creating.to_string(), "CREATING");
    }
}

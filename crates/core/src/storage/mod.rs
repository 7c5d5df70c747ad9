mod attributes;
mod error;
mod exit_codes;
mod table;
mod traits;
mod update;

pub use attributes::{
    validate_partition_key, ATTR_COMMENTS, ATTR_NAME, ATTR_SUMMARY, ATTR_TRANSCRIPTION,
    ATTR_USER_COMMENT, COMMENT_ATTRIBUTES,
};
pub use error::{RepositoryError, Result};
pub use exit_codes::repository_error_to_exit_code;
pub use table::{
    comments_table_config, format_table_config, validate_table_name, AttributeType, BillingMode,
    KeyAttribute, TableConfig, TableState, TableStatus, DEFAULT_CAPACITY_UNITS,
    DEFAULT_PARTITION_KEY, DEFAULT_TABLE_NAME,
};
pub use traits::{CommentRepository, TableProvisioner};
pub use update::{build_update_expression, UpdateExpression};

//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `usercomments_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use usercomments_core::storage::{RepositoryError, TableState};

/// Error codes DynamoDB and the AWS front end use for throttling.
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "ProvisionedThroughputExceededException",
    "LimitExceededException",
];

/// Whether an AWS error code signals throttling.
pub fn is_throttling_code(code: Option<&str>) -> bool {
    code.is_some_and(|c| THROTTLING_CODES.contains(&c))
}

/// Requests that never got a service response are treated as the store being unavailable.
fn transport_failure<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            Some(RepositoryError::StoreUnavailable(err.to_string()))
        }
        _ => None,
    }
}

/// Fallback for unmodeled service errors.
fn unhandled<E: ProvideErrorMetadata + Debug>(err: E, operation: &str) -> RepositoryError {
    if is_throttling_code(err.code()) {
        return RepositoryError::Throttled(format!(
            "{} throttled: {}",
            operation,
            err.message().unwrap_or("no message")
        ));
    }
    RepositoryError::QueryFailed(format!("{} failed: {:?}", operation, err))
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(mapped) = transport_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => unhandled(err, "GetItem"),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> RepositoryError {
    if let Some(mapped) = transport_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::Validation("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::Throttled("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err if err.code() == Some("ValidationException") => RepositoryError::Validation(
            err.message()
                .unwrap_or("PutItem rejected the item")
                .to_string(),
        ),
        err => unhandled(err, "PutItem"),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// A failed `attribute_exists` condition means the comment does not exist.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(mapped) = transport_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::Validation("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::Throttled("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err if err.code() == Some("ValidationException") => RepositoryError::Validation(
            err.message()
                .unwrap_or("UpdateItem rejected the update")
                .to_string(),
        ),
        err => unhandled(err, "UpdateItem"),
    }
}

/// Map a CreateTable SDK error to RepositoryError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = transport_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => RepositoryError::TableAlreadyExists {
            table_name: table_name.to_string(),
        },
        CreateTableError::LimitExceededException(_) => {
            RepositoryError::Throttled("Too many concurrent table operations".to_string())
        }
        CreateTableError::InternalServerError(_) => {
            RepositoryError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err if is_throttling_code(err.code()) => {
            RepositoryError::Throttled(format!("CreateTable throttled: {}", table_name))
        }
        err => RepositoryError::Provisioning(format!(
            "CreateTable failed for {}: {}",
            table_name,
            err.message().unwrap_or("unknown error")
        )),
    }
}

/// Map a DescribeTable SDK error. A missing table is `Ok(None)`, not an error.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> Result<Option<TableState>, RepositoryError> {
    if let Some(mapped) = transport_failure(&err) {
        return Err(mapped);
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => Ok(None),
        DescribeTableError::InternalServerError(_) => Err(RepositoryError::StoreUnavailable(
            "DynamoDB internal server error".to_string(),
        )),
        err => Err(unhandled(err, "DescribeTable")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttling_codes() {
        assert!(is_throttling_code(Some("ThrottlingException")));
        assert!(is_throttling_code(Some(
            "ProvisionedThroughputExceededException"
        )));
        assert!(!is_throttling_code(Some("ValidationException")));
        assert!(!is_throttling_code(None));
    }

    #[test]
    fn test_conditional_check_maps_to_not_found() {
        let service_err = UpdateItemError::ConditionalCheckFailedException(
            aws_sdk_dynamodb::types::error::ConditionalCheckFailedException::builder().build(),
        );
        let err: SdkError<UpdateItemError, ()> = SdkError::service_error(service_err, ());

        assert_eq!(
            map_update_item_error(err, "Comment", "1"),
            RepositoryError::NotFound {
                entity_type: "Comment",
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_resource_in_use_maps_to_table_already_exists() {
        let service_err = CreateTableError::ResourceInUseException(
            aws_sdk_dynamodb::types::error::ResourceInUseException::builder().build(),
        );
        let err: SdkError<CreateTableError, ()> = SdkError::service_error(service_err, ());

        assert_eq!(
            map_create_table_error(err, "User_Comments"),
            RepositoryError::TableAlreadyExists {
                table_name: "User_Comments".to_string()
            }
        );
    }

    #[test]
    fn test_throughput_exceeded_is_transient() {
        let service_err = GetItemError::ProvisionedThroughputExceededException(
            aws_sdk_dynamodb::types::error::ProvisionedThroughputExceededException::builder()
                .build(),
        );
        let err: SdkError<GetItemError, ()> = SdkError::service_error(service_err, ());

        assert!(map_get_item_error(err).is_transient());
    }

    #[test]
    fn test_missing_table_on_describe_is_none() {
        let service_err = DescribeTableError::ResourceNotFoundException(
            aws_sdk_dynamodb::types::error::ResourceNotFoundException::builder().build(),
        );
        let err: SdkError<DescribeTableError, ()> = SdkError::service_error(service_err, ());

        assert_eq!(map_describe_table_error(err), Ok(None));
    }
}

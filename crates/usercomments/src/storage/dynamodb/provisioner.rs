//! Table provisioning against DynamoDB.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as DynamoBillingMode, KeySchemaElement, KeyType,
    ProvisionedThroughput, ScalarAttributeType, TableStatus as DynamoTableStatus,
};
use aws_sdk_dynamodb::Client;

use usercomments_core::storage::{
    AttributeType, BillingMode, RepositoryError, Result, TableConfig, TableProvisioner,
    TableState, TableStatus,
};

use super::error::{map_create_table_error, map_describe_table_error};
use super::repository::DynamoDbRepository;

#[async_trait]
impl TableProvisioner for DynamoDbRepository {
    async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
        config.validate()?;
        create_table(&self.client, config).await?;

        tracing::info!(table = %config.table_name, "Table creation requested, waiting until active");
        poll_until_active(
            &config.table_name,
            ACTIVATION_POLL_INTERVAL,
            ACTIVATION_MAX_ATTEMPTS,
            || get_table_state(&self.client, &config.table_name),
        )
        .await?;

        tracing::info!(table = %config.table_name, "Table is active");
        Ok(())
    }

    async fn describe_table(&self, table_name: &str) -> Result<Option<TableState>> {
        get_table_state(&self.client, table_name).await
    }
}

/// How often table status is polled while waiting for activation.
const ACTIVATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How many status polls happen before giving up on activation.
const ACTIVATION_MAX_ATTEMPTS: u32 = 60;

/// Polls `fetch_state` until the table reports `ACTIVE`.
///
/// A missing table (`Ok(None)`, seen right after creation) and transient
/// errors are logged and polling continues. Any other error ends the wait.
pub(super) async fn poll_until_active<F, Fut>(
    table_name: &str,
    interval: Duration,
    max_attempts: u32,
    mut fetch_state: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<TableState>>>,
{
    for attempt in 1..=max_attempts {
        match fetch_state().await {
            Ok(Some(state)) if state.status == TableStatus::Active => return Ok(()),
            Ok(state) => {
                tracing::debug!(
                    table = %table_name,
                    attempt,
                    status = ?state.map(|s| s.status),
                    "Table not active yet"
                );
            }
            Err(err) if err.is_transient() => {
                tracing::warn!(table = %table_name, attempt, error = %err, "Polling table status failed");
            }
            Err(err) => return Err(err),
        }
        tokio::time::sleep(interval).await;
    }

    Err(RepositoryError::ActivationTimeout {
        table_name: table_name.to_string(),
    })
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(&config.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| RepositoryError::Provisioning(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&config.partition_key.name)
        .attribute_type(to_scalar_type(&config.partition_key.attribute_type))
        .build()
        .map_err(|e| RepositoryError::Provisioning(e.to_string()))?;

    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition);

    request = match config.billing_mode {
        BillingMode::Provisioned {
            read_capacity_units,
            write_capacity_units,
        } => request
            .billing_mode(DynamoBillingMode::Provisioned)
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(read_capacity_units)
                    .write_capacity_units(write_capacity_units)
                    .build()
                    .map_err(|e| RepositoryError::Provisioning(e.to_string()))?,
            ),
        BillingMode::PayPerRequest => request.billing_mode(DynamoBillingMode::PayPerRequest),
    };

    request
        .send()
        .await
        .map_err(|e| map_create_table_error(e, &config.table_name))?;
    Ok(())
}

/// Fetches current table state, returns None if the table doesn't exist.
async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => return map_describe_table_error(err),
    };

    let table = response.table().ok_or_else(|| {
        RepositoryError::InvalidData(format!("DescribeTable returned no table for {table_name}"))
    })?;

    Ok(Some(TableState {
        table_name: table_name.to_string(),
        status: table
            .table_status()
            .map(from_dynamo_status)
            .unwrap_or(TableStatus::Creating),
    }))
}

/// Any status other than the four lifecycle states means the table is not usable yet.
fn from_dynamo_status(status: &DynamoTableStatus) -> TableStatus {
    match status {
        DynamoTableStatus::Active => TableStatus::Active,
        DynamoTableStatus::Creating => TableStatus::Creating,
        DynamoTableStatus::Deleting => TableStatus::Deleting,
        _ => TableStatus::Updating,
    }
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}

//! DynamoDB repository implementation.
//!
//! Implements `CommentRepository` from `usercomments_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use usercomments_core::comment::{
    validate_annotation, validate_comment, Annotation, Comment, CommentId, UpdateCommentRequest,
};
use usercomments_core::storage::{
    build_update_expression, CommentRepository, Result, ATTR_COMMENTS,
};

use super::client::create_client;
use super::conversions::{annotation_to_value, comment_to_item, item_to_comment};
use super::error::{map_get_item_error, map_put_item_error, map_update_item_error};
use crate::config::Config;

const ENTITY_TYPE: &str = "Comment";

/// Appends to the annotation list, creating it when absent.
const APPEND_ANNOTATION_EXPRESSION: &str =
    "SET #comments = list_append(if_not_exists(#comments, :empty), :new)";

/// DynamoDB-based repository implementation.
///
/// Holds the SDK client by value; the client is cheap to clone and safe to
/// share between tasks.
pub struct DynamoDbRepository {
    pub(super) client: Client,
    table_name: String,
    partition_key: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client, table name and key attribute.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        partition_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            partition_key: partition_key.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Credentials come from the AWS default credential chain.
    pub async fn from_config(config: &Config) -> Self {
        let client = create_client(config).await;
        Self::new(client, &config.table_name, &config.partition_key)
    }

    fn key_value(&self, id: &CommentId) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl CommentRepository for DynamoDbRepository {
    async fn add_comment(&self, comment: &Comment) -> Result<()> {
        validate_comment(comment)?;
        let item = comment_to_item(comment, &self.partition_key);

        // Unconditional put: an existing comment with the same id is replaced.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        tracing::debug!(table = %self.table_name, comment_id = %comment.id, "Comment stored");
        Ok(())
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Option<Comment>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.partition_key, self.key_value(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_comment(&item, &self.partition_key)?)),
            None => {
                tracing::debug!(table = %self.table_name, comment_id = %id, "Comment not found");
                Ok(None)
            }
        }
    }

    async fn update_comment(&self, id: &CommentId, update: &UpdateCommentRequest) -> Result<()> {
        let expression = build_update_expression(update)?;

        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(&self.partition_key, self.key_value(id))
            .update_expression(expression.expression)
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", &self.partition_key);

        for (placeholder, attribute) in expression.names {
            request = request.expression_attribute_names(placeholder, attribute);
        }
        for (placeholder, value) in expression.values {
            request = request.expression_attribute_values(placeholder, AttributeValue::S(value));
        }

        request
            .send()
            .await
            .map_err(|e| map_update_item_error(e, ENTITY_TYPE, id.to_string()))?;

        tracing::debug!(table = %self.table_name, comment_id = %id, "Comment updated");
        Ok(())
    }

    async fn append_annotation(&self, id: &CommentId, annotation: &Annotation) -> Result<()> {
        validate_annotation(annotation)?;

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(&self.partition_key, self.key_value(id))
            .update_expression(APPEND_ANNOTATION_EXPRESSION)
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", &self.partition_key)
            .expression_attribute_names("#comments", ATTR_COMMENTS)
            .expression_attribute_values(":empty", AttributeValue::L(Vec::new()))
            .expression_attribute_values(
                ":new",
                AttributeValue::L(vec![annotation_to_value(annotation)]),
            )
            .send()
            .await
            .map_err(|e| map_update_item_error(e, ENTITY_TYPE, id.to_string()))?;

        tracing::debug!(
            table = %self.table_name,
            comment_id = %id,
            label = %annotation.label,
            "Annotation appended"
        );
        Ok(())
    }
}

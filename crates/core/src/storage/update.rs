//! Update expression building for partial comment updates.
//!
//! Pure functions: the DynamoDB backend turns the result into an
//! `UpdateItem` request, tests inspect it directly.

use std::collections::BTreeMap;

use crate::comment::UpdateCommentRequest;

use super::Result;

/// A `SET` update expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExpression {
    /// e.g. `SET #user_comment = :user_comment, #summary = :summary`
    pub expression: String,
    /// `#name` placeholder to attribute name.
    pub names: BTreeMap<String, String>,
    /// `:value` placeholder to string value.
    pub values: BTreeMap<String, String>,
}

/// Builds the `SET` expression for the supplied fields of an update.
///
/// Attribute names go through `#` placeholders so reserved words never
/// reach the expression. An update without supplied fields is rejected
/// instead of producing an empty `SET`.
pub fn build_update_expression(update: &UpdateCommentRequest) -> Result<UpdateExpression> {
    update.validate()?;

    let mut assignments = Vec::new();
    let mut names = BTreeMap::new();
    let mut values = BTreeMap::new();

    for (field, value) in update.supplied_fields() {
        let attribute = field.attribute_name();
        let name_placeholder = format!("#{attribute}");
        let value_placeholder = format!(":{attribute}");

        assignments.push(format!("{name_placeholder} = {value_placeholder}"));
        names.insert(name_placeholder, attribute.to_string());
        values.insert(value_placeholder, value.to_string());
    }

    Ok(UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    })
}

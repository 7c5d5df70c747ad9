//! JSON output formatting.

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usercomments_core::comment::{Comment, CommentId};

    #[test]
    fn test_absent_fields_are_omitted() {
        let comment = Comment::new(CommentId::new("1").unwrap()).with_summary("short");
        assert_eq!(format_json(&comment), r#"{"id":"1","summary":"short"}"#);
    }
}

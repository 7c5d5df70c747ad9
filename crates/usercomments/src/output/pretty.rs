//! Pretty output formatting.

use usercomments_core::comment::Comment;
use usercomments_core::storage::TableState;

/// Format a comment for display.
pub fn format_comment(comment: &Comment) -> String {
    let mut output = format!("Comment {}", comment.id);
    let fields = [
        ("Name", &comment.name),
        ("User comment", &comment.user_comment),
        ("Transcription", &comment.transcription),
        ("Summary", &comment.summary),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            output.push_str(&format!("\n  {}: {}", label, value));
        }
    }
    if let Some(annotations) = &comment.comments {
        output.push_str(&format!("\n  Annotations ({}):", annotations.len()));
        for annotation in annotations {
            output.push_str(&format!(
                "\n    - [{}] {:?} ({}..{})",
                annotation.label, annotation.text, annotation.start, annotation.end
            ));
        }
    }
    output
}

/// Format a missing comment.
pub fn format_not_found(id: &str) -> String {
    format!("Comment {} not found.", id)
}

/// Format table state for display.
pub fn format_table_state(state: &TableState) -> String {
    format!("{}: {}", state.table_name, state.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usercomments_core::comment::{Annotation, CommentId};
    use usercomments_core::storage::TableStatus;

    #[test]
    fn test_format_comment_lists_present_fields() {
        let comment = Comment::new(CommentId::new("1").unwrap())
            .with_user_comment("This is an example comment")
            .with_annotation(Annotation::new("example", "note", 4, 11));

        assert_eq!(
            format_comment(&comment),
            "Comment 1\n  User comment: This is an example comment\n  Annotations (1):\n    - [note] \"example\" (4..11)"
        );
    }

    #[test]
    fn test_format_table_state() {
        let state = TableState {
            table_name: "User_Comments".to_string(),
            status: TableStatus::Active,
        };
        assert_eq!(format_table_state(&state), "User_Comments: ACTIVE");
    }
}

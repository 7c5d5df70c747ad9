//! Comment CLI commands.

use clap::Args;

use usercomments_core::comment::{Annotation, CreateCommentRequest, UpdateCommentRequest};

/// Arguments for `add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Comment id.
    pub id: String,
    /// Display name of the recording.
    #[arg(long)]
    pub name: Option<String>,
    /// Free-text comment from the user.
    #[arg(long)]
    pub user_comment: Option<String>,
    /// Transcription text.
    #[arg(long)]
    pub transcription: Option<String>,
    /// Summary text.
    #[arg(long)]
    pub summary: Option<String>,
    /// Highlighted span, repeatable. TEXT may itself contain ':'.
    #[arg(
        long = "annotation",
        value_name = "TEXT:LABEL:START:END",
        value_parser = parse_annotation
    )]
    pub annotations: Vec<Annotation>,
}

impl AddArgs {
    pub fn into_request(self) -> CreateCommentRequest {
        let request = CreateCommentRequest {
            id: self.id,
            name: self.name,
            user_comment: self.user_comment,
            transcription: self.transcription,
            summary: self.summary,
            comments: None,
        };
        self.annotations
            .into_iter()
            .fold(request, CreateCommentRequest::with_annotation)
    }
}

/// Arguments for `annotate`.
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Comment id.
    pub id: String,
    /// Highlighted text.
    #[arg(long)]
    pub text: String,
    /// Annotation label.
    #[arg(long)]
    pub label: String,
    /// Start offset in the transcription.
    #[arg(long)]
    pub start: u32,
    /// End offset in the transcription.
    #[arg(long)]
    pub end: u32,
}

impl AnnotateArgs {
    pub fn annotation(&self) -> Annotation {
        Annotation::new(&self.text, &self.label, self.start, self.end)
    }
}

/// Parses `TEXT:LABEL:START:END`, splitting from the right.
pub fn parse_annotation(value: &str) -> Result<Annotation, String> {
    let mut parts = value.rsplitn(4, ':');
    let (Some(end), Some(start), Some(label), Some(text)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected TEXT:LABEL:START:END, got {value:?}"));
    };

    let offset = |name: &str, raw: &str| {
        raw.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid {name} offset {raw:?}: {e}"))
    };
    Ok(Annotation::new(
        text,
        label,
        offset("start", start)?,
        offset("end", end)?,
    ))
}

/// Arguments for `get`.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Comment id.
    pub id: String,
}

/// Arguments for `update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Comment id.
    pub id: String,
    /// New user comment.
    #[arg(long)]
    pub user_comment: Option<String>,
    /// New transcription.
    #[arg(long)]
    pub transcription: Option<String>,
    /// New summary.
    #[arg(long)]
    pub summary: Option<String>,
}

impl UpdateArgs {
    pub fn to_request(&self) -> UpdateCommentRequest {
        UpdateCommentRequest {
            user_comment: self.user_comment.clone(),
            transcription: self.transcription.clone(),
            summary: self.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotation() {
        assert_eq!(
            parse_annotation("sample transcription:highlight:10:30"),
            Ok(Annotation::new("sample transcription", "highlight", 10, 30))
        );
    }

    #[test]
    fn test_parse_annotation_text_may_contain_colons() {
        assert_eq!(
            parse_annotation("at 12:45 the speaker:quote:3:9"),
            Ok(Annotation::new("at 12:45 the speaker", "quote", 3, 9))
        );
    }

    #[test]
    fn test_parse_annotation_rejects_malformed_input() {
        assert!(parse_annotation("text:label:10").is_err());
        assert!(parse_annotation("text:label:ten:30").is_err());
        assert!(parse_annotation("text:label:10:-1").is_err());
    }
}

//! CLI command definitions.

pub mod comments;
pub mod table;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Backend, Config};

/// Store and update user comments on audio transcriptions in DynamoDB.
#[derive(Debug, Parser)]
#[command(name = "usercomments")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Storage backend [env: COMMENTS_BACKEND]
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// AWS region [env: AWS_REGION]
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// DynamoDB endpoint override, e.g. http://localhost:8000 [env: AWS_ENDPOINT_URL]
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Table name [env: COMMENTS_TABLE_NAME]
    #[arg(long, global = true)]
    pub table_name: Option<String>,

    /// Partition key attribute name [env: COMMENTS_PARTITION_KEY]
    #[arg(long, global = true)]
    pub partition_key: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "COMMENTS_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies command-line overrides on top of environment configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(table_name) = &self.table_name {
            config.table_name = table_name.clone();
        }
        if let Some(partition_key) = &self.partition_key {
            config.partition_key = partition_key.clone();
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Table provisioning.
    Table(table::TableCommand),
    /// Store a comment, replacing any comment with the same id.
    Add(comments::AddArgs),
    /// Fetch a comment by id.
    Get(comments::GetArgs),
    /// Update selected fields of an existing comment.
    Update(comments::UpdateArgs),
    /// Append an annotation to an existing comment.
    Annotate(comments::AnnotateArgs),
    /// Add, read, update and read back the sample comment "1".
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_global_flags() {
        let cli = Cli::parse_from([
            "usercomments",
            "update",
            "1",
            "--user-comment",
            "Updated comment",
            "--format",
            "json",
            "--backend",
            "memory",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, "1");
                assert_eq!(args.user_comment.as_deref(), Some("Updated comment"));
                assert!(args.transcription.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_with_repeated_annotations() {
        let cli = Cli::parse_from([
            "usercomments",
            "add",
            "1",
            "--transcription",
            "This is a sample transcription for audio 1.",
            "--annotation",
            "sample transcription:highlight:10:30",
            "--annotation",
            "audio 1:reference:37:44",
        ]);

        match cli.command {
            Commands::Add(args) => {
                let comments = args.into_request().comments.unwrap();
                assert_eq!(comments.len(), 2);
                assert_eq!(comments[0].text, "sample transcription");
                assert_eq!(comments[1].label, "reference");
                assert_eq!((comments[1].start, comments[1].end), (37, 44));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_without_annotations_leaves_list_absent() {
        let cli = Cli::parse_from(["usercomments", "add", "1", "--summary", "s"]);

        match cli.command {
            Commands::Add(args) => assert!(args.into_request().comments.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_annotation_is_a_parse_error() {
        let result = Cli::try_parse_from(["usercomments", "add", "1", "--annotation", "oops"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_annotate() {
        let cli = Cli::parse_from([
            "usercomments",
            "annotate",
            "1",
            "--text",
            "audio 1",
            "--label",
            "reference",
            "--start",
            "37",
            "--end",
            "44",
        ]);

        match cli.command {
            Commands::Annotate(args) => {
                assert_eq!(args.id, "1");
                assert_eq!(
                    args.annotation(),
                    usercomments_core::comment::Annotation::new("audio 1", "reference", 37, 44)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_environment_values() {
        let cli = Cli::parse_from([
            "usercomments",
            "--table-name",
            "Other_Table",
            "--region",
            "eu-west-1",
            "demo",
        ]);
        let config = cli.apply_overrides(Config::default());

        assert_eq!(config.table_name, "Other_Table");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.partition_key, "id");
    }
}

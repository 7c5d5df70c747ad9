//! Command execution.
//!
//! Each command returns the lines to print so the binary stays a thin shell.

use usercomments_core::comment::{Comment, CommentId, UpdateCommentRequest};
use usercomments_core::storage::{
    format_table_config, BillingMode, RepositoryError, Result, DEFAULT_CAPACITY_UNITS,
};

use crate::cli::comments::{AddArgs, AnnotateArgs, GetArgs, UpdateArgs};
use crate::cli::table::{BillingArg, TableAction};
use crate::cli::{Commands, OutputFormat};
use crate::config::Config;
use crate::output::{format_output, pretty};
use crate::storage::Store;

/// Id used by the `demo` command.
pub const DEMO_COMMENT_ID: &str = "1";

/// Runs a command against the store.
pub async fn execute(
    command: Commands,
    store: &Store,
    config: &Config,
    format: OutputFormat,
) -> Result<Vec<String>> {
    match command {
        Commands::Table(table) => execute_table(table.action, store, config, format).await,
        Commands::Add(args) => add(args, store, format).await,
        Commands::Get(args) => get(args, store, format).await,
        Commands::Update(args) => update(args, store, format).await,
        Commands::Annotate(args) => annotate(args, store, format).await,
        Commands::Demo => demo(store, format).await,
    }
}

async fn execute_table(
    action: TableAction,
    store: &Store,
    config: &Config,
    format: OutputFormat,
) -> Result<Vec<String>> {
    match action {
        TableAction::Create {
            billing,
            read_capacity,
            write_capacity,
            dry_run,
        } => {
            let billing_mode =
                resolve_billing_mode(config.billing_mode, billing, read_capacity, write_capacity);
            let table_config = config.table_config().with_billing_mode(billing_mode);
            table_config.validate()?;

            if dry_run {
                return Ok(format_table_config(&table_config));
            }

            tracing::info!(
                table = %table_config.table_name,
                store = %config.target_display(),
                "Creating table"
            );
            store.tables.ensure_table(&table_config).await?;

            let state = store
                .tables
                .describe_table(&table_config.table_name)
                .await?
                .ok_or_else(|| {
                    RepositoryError::Provisioning(format!(
                        "Table {} disappeared after creation",
                        table_config.table_name
                    ))
                })?;
            Ok(vec![format_output(&state, format, |state| {
                format!("Created {}", pretty::format_table_state(state))
            })])
        }
        TableAction::Status => match store.tables.describe_table(&config.table_name).await? {
            Some(state) => Ok(vec![format_output(
                &state,
                format,
                pretty::format_table_state,
            )]),
            None => Err(RepositoryError::NotFound {
                entity_type: "Table",
                id: config.table_name.clone(),
            }),
        },
    }
}

/// Combines the configured billing mode with command-line overrides.
pub fn resolve_billing_mode(
    configured: BillingMode,
    billing: Option<BillingArg>,
    read_capacity: Option<i64>,
    write_capacity: Option<i64>,
) -> BillingMode {
    let (configured_read, configured_write) = match configured {
        BillingMode::Provisioned {
            read_capacity_units,
            write_capacity_units,
        } => (read_capacity_units, write_capacity_units),
        BillingMode::PayPerRequest => (DEFAULT_CAPACITY_UNITS, DEFAULT_CAPACITY_UNITS),
    };
    let provisioned = BillingMode::Provisioned {
        read_capacity_units: read_capacity.unwrap_or(configured_read),
        write_capacity_units: write_capacity.unwrap_or(configured_write),
    };

    match billing {
        Some(BillingArg::PayPerRequest) => BillingMode::PayPerRequest,
        Some(BillingArg::Provisioned) => provisioned,
        None if read_capacity.is_some() || write_capacity.is_some() => provisioned,
        None => configured,
    }
}

async fn add(args: AddArgs, store: &Store, format: OutputFormat) -> Result<Vec<String>> {
    let comment = args.into_request().into_comment()?;
    store.comments.add_comment(&comment).await?;
    Ok(vec![format_output(&comment, format, |comment| {
        format!("Stored:\n{}", pretty::format_comment(comment))
    })])
}

async fn get(args: GetArgs, store: &Store, format: OutputFormat) -> Result<Vec<String>> {
    let id = CommentId::new(args.id)?;
    let comment = store.comments.get_comment(&id).await?;
    Ok(vec![render_lookup(&id, comment.as_ref(), format)])
}

async fn update(args: UpdateArgs, store: &Store, format: OutputFormat) -> Result<Vec<String>> {
    let id = CommentId::new(args.id.clone())?;
    store.comments.update_comment(&id, &args.to_request()).await?;
    Ok(vec![format_output(
        &serde_json::json!({ "updated": id }),
        format,
        |_| format!("Updated comment {}", id),
    )])
}

async fn annotate(args: AnnotateArgs, store: &Store, format: OutputFormat) -> Result<Vec<String>> {
    let id = CommentId::new(args.id.clone())?;
    store
        .comments
        .append_annotation(&id, &args.annotation())
        .await?;
    let comment = store.comments.get_comment(&id).await?;
    Ok(vec![render_lookup(&id, comment.as_ref(), format)])
}

async fn demo(store: &Store, format: OutputFormat) -> Result<Vec<String>> {
    let id = CommentId::new(DEMO_COMMENT_ID)?;
    let comment = Comment::new(id.clone())
        .with_user_comment("This is an example comment")
        .with_transcription("This is an example transcription")
        .with_summary("This is an example summary");

    store.comments.add_comment(&comment).await?;
    let before = store.comments.get_comment(&id).await?;

    let update = UpdateCommentRequest::new().with_user_comment("Updated example comment");
    store.comments.update_comment(&id, &update).await?;
    let after = store.comments.get_comment(&id).await?;

    Ok(vec![
        render_lookup(&id, before.as_ref(), format),
        render_lookup(&id, after.as_ref(), format),
    ])
}

/// Absence is a normal outcome: JSON renders `null`, pretty renders a message.
fn render_lookup(id: &CommentId, comment: Option<&Comment>, format: OutputFormat) -> String {
    format_output(&comment, format, |comment| match comment {
        Some(comment) => pretty::format_comment(comment),
        None => pretty::format_not_found(id.as_str()),
    })
}

//! Table CLI commands.

use clap::{Parser, Subcommand, ValueEnum};

/// Table provisioning commands.
#[derive(Debug, Parser)]
pub struct TableCommand {
    #[command(subcommand)]
    pub action: TableAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TableAction {
    /// Create the comments table and wait until it is active.
    Create {
        /// Billing mode.
        #[arg(long)]
        billing: Option<BillingArg>,
        /// Read capacity units (provisioned billing only).
        #[arg(long)]
        read_capacity: Option<i64>,
        /// Write capacity units (provisioned billing only).
        #[arg(long)]
        write_capacity: Option<i64>,
        /// Print the table definition without creating it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the table status.
    Status,
}

/// Billing mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BillingArg {
    Provisioned,
    PayPerRequest,
}

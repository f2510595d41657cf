use clap::{Args, Subcommand};

use crate::cli::subcommands::{AttendanceCommands, PromotionCommands, StudentCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Promotions and their curriculum timeline.
    Promotion {
        #[command(subcommand)]
        action: PromotionCommands,
    },
    /// Daily attendance.
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommands,
    },
    /// Student documents and tracking.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Add missing tracking structures to legacy student documents.
    Backfill(BackfillArgs),
}

#[derive(Clone, Debug, Args)]
pub struct BackfillArgs {
    /// Report what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
    /// Student ids fetched per page.
    #[arg(long)]
    pub page_size: Option<u32>,
}

use clap::Subcommand;

/// Attendance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AttendanceCommands {
    /// Record (or overwrite) one student's attendance for a day.
    Record {
        promotion: String,
        student: String,
        /// Day as YYYY-MM-DD.
        date: String,
        /// present, absent, late, excused, or "" to clear.
        #[arg(long, default_value = "")]
        status: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Record a whole day's roll call.
    RollCall {
        promotion: String,
        date: String,
        /// Entry as STUDENT=STATUS or STUDENT=STATUS:NOTE, repeatable.
        #[arg(long = "entry", required = true)]
        entries: Vec<String>,
    },
    /// List attendance for a promotion.
    List {
        promotion: String,
        #[arg(long)]
        student: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one record; fails if it does not exist.
    Get {
        promotion: String,
        student: String,
        date: String,
    },
    /// Delete one record. Deleting a missing record is not an error.
    Delete {
        promotion: String,
        student: String,
        date: String,
    },
}

use clap::Subcommand;

/// Student commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Enroll a student in a promotion.
    Create {
        #[arg(long)]
        promotion: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        situation: Option<String>,
    },
    /// Get a student by ID.
    Get {
        id: String,
        /// Print the stored document as-is instead of the typed view.
        #[arg(long)]
        raw: bool,
    },
    /// List students of a promotion.
    List {
        promotion: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Append a teacher note.
    Note {
        id: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Mark a module as completed.
    CompleteModule { id: String, module: String },
}

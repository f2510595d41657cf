use clap::Subcommand;

/// Promotion commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PromotionCommands {
    /// Create a promotion.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        weeks: i64,
        /// Module as NAME:WEEKS, repeatable, in curriculum order.
        #[arg(long = "module")]
        modules: Vec<String>,
        /// JSON file with the full module list (courses and projects included).
        #[arg(long, conflicts_with = "modules")]
        modules_file: Option<String>,
    },
    /// Get a promotion by ID.
    Get { id: String },
    /// List promotions.
    List,
    /// Replace the module list of a promotion.
    SetModules {
        id: String,
        #[arg(long = "module")]
        modules: Vec<String>,
        #[arg(long, conflicts_with = "modules")]
        modules_file: Option<String>,
    },
    /// Show the week-by-week curriculum timeline.
    Timeline { id: String },
}

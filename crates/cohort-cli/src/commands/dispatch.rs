use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Promotion { action } => commands::promotion::handle(&action, ctx, flags).await,
        Commands::Attendance { action } => commands::attendance::handle(&action, ctx, flags).await,
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Backfill(args) => commands::backfill::handle(&args, ctx, flags).await,
    }
}

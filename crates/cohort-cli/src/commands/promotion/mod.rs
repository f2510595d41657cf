mod create;
mod get;
mod list;
mod set_modules;
mod timeline;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PromotionCommands;
use crate::context::AppContext;

/// Handle `cohortctl promotion`.
pub async fn handle(
    action: &PromotionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PromotionCommands::Create {
            name,
            weeks,
            modules,
            modules_file,
        } => create::run(name, *weeks, modules, modules_file.as_deref(), ctx, flags).await,
        PromotionCommands::Get { id } => get::run(id, ctx, flags).await,
        PromotionCommands::List => list::run(ctx, flags).await,
        PromotionCommands::SetModules {
            id,
            modules,
            modules_file,
        } => set_modules::run(id, modules, modules_file.as_deref(), ctx, flags).await,
        PromotionCommands::Timeline { id } => timeline::run(id, ctx, flags).await,
    }
}

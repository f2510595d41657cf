mod create;
mod get;
mod list;
mod track;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::context::AppContext;

/// Handle `cohortctl student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StudentCommands::Create {
            promotion,
            name,
            email,
            phone,
            situation,
        } => {
            create::run(
                promotion,
                create::CreateArgs {
                    name: name.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    situation: situation.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        StudentCommands::Get { id, raw } => get::run(id, *raw, ctx, flags).await,
        StudentCommands::List { promotion, limit } => list::run(promotion, *limit, ctx, flags).await,
        StudentCommands::Note { id, text, author } => {
            track::note(id, text, author.as_deref(), ctx, flags).await
        }
        StudentCommands::CompleteModule { id, module } => {
            track::complete_module(id, module, ctx, flags).await
        }
    }
}

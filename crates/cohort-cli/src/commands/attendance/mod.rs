mod delete;
mod get;
mod list;
mod record;
mod roll_call;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AttendanceCommands;
use crate::context::AppContext;

/// Handle `cohortctl attendance`.
pub async fn handle(
    action: &AttendanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AttendanceCommands::Record {
            promotion,
            student,
            date,
            status,
            note,
        } => record::run(promotion, student, date, status, note.as_deref(), ctx, flags).await,
        AttendanceCommands::RollCall {
            promotion,
            date,
            entries,
        } => roll_call::run(promotion, date, entries, ctx, flags).await,
        AttendanceCommands::List {
            promotion,
            student,
            from,
            to,
            limit,
        } => {
            list::run(
                promotion,
                list::ListArgs {
                    student: student.clone(),
                    from: from.clone(),
                    to: to.clone(),
                    limit: *limit,
                },
                ctx,
                flags,
            )
            .await
        }
        AttendanceCommands::Get {
            promotion,
            student,
            date,
        } => get::run(promotion, student, date, ctx, flags).await,
        AttendanceCommands::Delete {
            promotion,
            student,
            date,
        } => delete::run(promotion, student, date, ctx, flags).await,
    }
}

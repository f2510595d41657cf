use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn note(
    id: &str,
    text: &str,
    author: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let student = ctx.service.add_teacher_note(id, text, author).await?;
    output(&student, flags.format)
}

pub async fn complete_module(
    id: &str,
    module: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let student = ctx.service.complete_module(id, module).await?;
    output(&student, flags.format)
}

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, raw: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if raw {
        let document = ctx.service.get_student_document(id).await?;
        return output(&document, flags.format);
    }
    let student = ctx.service.get_student(id).await?;
    output(&student, flags.format)
}

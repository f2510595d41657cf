use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    promotion: &str,
    student: &str,
    date: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let record = ctx
        .service
        .confirm_attendance(promotion, student, date)
        .await?;
    output(&record, flags.format)
}

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    promotion: &str,
    student: &str,
    date: &str,
    status: &str,
    note: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let record = ctx
        .service
        .record_attendance(promotion, student, date, status, note)
        .await?;
    output(&record, flags.format)
}

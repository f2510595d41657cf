use cohort_core::responses::DeleteResponse;

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
    let deleted = ctx
        .service
        .delete_attendance(promotion, student, date)
        .await?;
    output(&DeleteResponse { deleted }, flags.format)
}

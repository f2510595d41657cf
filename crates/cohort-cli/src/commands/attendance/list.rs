use cohort_db::repos::attendance::AttendanceFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub struct ListArgs {
    pub student: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
}

pub async fn run(
    promotion: &str,
    args: ListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = AttendanceFilter {
        student_id: args.student,
        date_from: args.from,
        date_to: args.to,
        limit: Some(effective_limit(
            args.limit,
            flags.limit,
            ctx.config.general.default_limit,
        )),
    };
    let records = ctx.service.query_attendance(promotion, &filter).await?;
    output(&records, flags.format)
}

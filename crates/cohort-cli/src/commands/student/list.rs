use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    promotion: &str,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let students = ctx.service.list_students(promotion, limit).await?;
    let rows: Vec<_> = students
        .iter()
        .map(|student| {
            json!({
                "id": student.id,
                "name": student.document.name,
                "email": student.document.email,
                "administrativeSituation": student.document.administrative_situation,
                "completedModules": student.document.technical_tracking.completed_modules.len(),
            })
        })
        .collect();
    output(&rows, flags.format)
}

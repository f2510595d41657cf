use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let promotions = ctx.service.list_promotions(limit).await?;

    // Summaries only; the module list is shown by `promotion get`.
    let rows: Vec<_> = promotions
        .iter()
        .map(|promotion| {
            json!({
                "id": promotion.id,
                "name": promotion.name,
                "weeks": promotion.weeks,
                "modules": promotion.modules.len(),
                "createdAt": promotion.created_at,
            })
        })
        .collect();
    output(&rows, flags.format)
}

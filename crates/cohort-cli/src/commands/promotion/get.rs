use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let promotion = ctx.service.get_promotion(id).await?;
    output(&promotion, flags.format)
}

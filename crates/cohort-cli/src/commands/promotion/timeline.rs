use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, timeline::render_timeline};

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.service.promotion_timeline(id).await?;
    if flags.format == OutputFormat::Table {
        println!("{}", render_timeline(&response.promotion, &response.timeline));
        return Ok(());
    }
    output(&response, flags.format)
}

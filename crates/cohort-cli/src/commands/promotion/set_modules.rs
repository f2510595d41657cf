use crate::cli::GlobalFlags;
use crate::commands::shared::parse::load_modules;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    modules: &[String],
    modules_file: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let modules = load_modules(modules, modules_file)?;
    let promotion = ctx.service.update_promotion_modules(id, modules).await?;
    output(&promotion, flags.format)
}

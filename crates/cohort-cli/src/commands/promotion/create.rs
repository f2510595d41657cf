use crate::cli::GlobalFlags;
use crate::commands::shared::parse::load_modules;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    weeks: i64,
    modules: &[String],
    modules_file: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let modules = load_modules(modules, modules_file)?;
    let promotion = ctx.service.create_promotion(name, weeks, modules).await?;
    output(&promotion, flags.format)
}

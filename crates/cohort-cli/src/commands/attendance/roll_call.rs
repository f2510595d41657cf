use cohort_core::responses::RollCallResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_roll_call_entry;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    promotion: &str,
    date: &str,
    entries: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entries = entries
        .iter()
        .map(|raw| parse_roll_call_entry(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let records = ctx.service.record_roll_call(promotion, date, &entries).await?;
    let response = RollCallResponse {
        recorded: u32::try_from(records.len()).unwrap_or(u32::MAX),
        records,
    };
    output(&response, flags.format)
}

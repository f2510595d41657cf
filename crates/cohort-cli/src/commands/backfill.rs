use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cohort_db::backfill::BackfillOptions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BackfillArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cohortctl backfill`.
///
/// Ctrl-C stops the pass after the document in flight; the partial report is
/// still printed. Failed documents are listed in the report and the command
/// itself only fails when the documents cannot be enumerated.
pub async fn handle(args: &BackfillArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cancel = Arc::new(AtomicBool::new(false));
    let watcher = {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("backfill: interrupt received, stopping after current document");
                cancel.store(true, Ordering::Relaxed);
            }
        })
    };

    let options = BackfillOptions {
        dry_run: args.dry_run,
        page_size: args.page_size,
        cancel: Some(cancel),
    };
    let result = ctx.service.backfill_tracking_structures_with(&options).await;
    watcher.abort();
    let report = result?;

    if report.has_failures() && !flags.quiet {
        eprintln!(
            "backfill: {} of {} document(s) could not be repaired",
            report.failed, report.scanned
        );
    }
    output(&report, flags.format)
}

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `ortho regenerate`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let progress = Progress::spinner("regenerating derived tables");
    let result = ctx.service.regenerate_all().await;
    let summary = progress
        .finish_with(result, "derived tables regenerated", "regeneration rolled back")
        .context("failed to regenerate derived tables")?;

    output(&summary, flags.format)
}

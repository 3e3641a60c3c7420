use anyhow::{Context, bail};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResetArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ortho reset --yes`.
pub async fn handle(args: &ResetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.yes {
        bail!(
            "reset drops every record and derived table in {}; pass --yes to confirm",
            ctx.db_path.display()
        );
    }

    let response = ctx
        .service
        .reset()
        .await
        .context("failed to reset the evidence store")?;
    output(&response, flags.format)
}

use std::path::Path;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `ortho import <file>`.
pub async fn handle(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let progress = Progress::spinner("importing records");

    let result = if args.file == Path::new("-") {
        let records = ortho_db::import::read_import(std::io::stdin().lock())
            .context("failed to read records from stdin")?;
        progress.set_message(&format!("importing {} records", records.len()));
        ctx.service.import_records(&records).await
    } else {
        ctx.service.import_file(&args.file).await
    };

    let summary = progress
        .finish_with(result, "import complete", "import failed")
        .with_context(|| format!("failed to import {}", args.file.display()))?;

    output(&summary, flags.format)
}

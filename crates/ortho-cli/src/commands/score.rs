use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::commands::shared::condition::resolve_condition_ids;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ortho score --age N --condition ...`.
pub async fn handle(args: &ScoreArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ids = resolve_condition_ids(&ctx.service, &args.conditions).await?;
    let result = ctx.service.calculate_necessity(args.age, &ids).await;
    output(&result, flags.format)
}

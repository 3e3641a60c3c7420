use ortho_core::entities::EconomicImpactView;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EconomicArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EconomicResponse {
    age: u32,
    #[serde(flatten)]
    view: EconomicImpactView,
}

/// Handle `ortho economic --age N`.
pub async fn handle(
    args: &EconomicArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let view = ctx.service.economic_impact(args.age).await;
    output(
        &EconomicResponse {
            age: args.age,
            view,
        },
        flags.format,
    )
}

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed store command to its handler.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Regenerate => commands::regenerate::handle(ctx, flags).await,
        Commands::Reset(args) => commands::reset::handle(&args, ctx, flags).await,
        Commands::Score(args) => commands::score::handle(&args, ctx, flags).await,
        Commands::Economic(args) => commands::economic::handle(&args, ctx, flags).await,
        Commands::Conditions => commands::listing::conditions(ctx, flags).await,
        Commands::Records(args) => commands::listing::records(&args, ctx, flags).await,
        Commands::Findings(args) => commands::listing::findings(&args, ctx, flags).await,
        Commands::Risk => commands::listing::risk(ctx, flags).await,
        Commands::Effects(args) => commands::listing::effects(&args, ctx, flags).await,
        Commands::Timing(args) => commands::listing::timing(&args, ctx, flags).await,
        Commands::Scenarios(args) => commands::listing::scenarios(&args, ctx, flags).await,
        Commands::Extract(_) | Commands::Schema(_) => {
            anyhow::bail!("extract and schema do not use the store and are handled in main")
        }
    }
}

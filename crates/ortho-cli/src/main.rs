use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod schema;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ortho error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    // Store-free commands.
    match &cli.command {
        cli::Commands::Extract(args) => return commands::extract::handle(args, &flags),
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let config = bootstrap::load_config()?;
    let db_path: PathBuf = bootstrap::resolve_db_path(&flags, &config)?;

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire_for_store(&db_path).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(db_path, config)
        .await
        .context("failed to open the evidence store")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ORTHO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

const fn command_requires_write_lock(command: &cli::Commands) -> bool {
    matches!(
        command,
        cli::Commands::Import(_) | cli::Commands::Regenerate | cli::Commands::Reset(_)
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::command_requires_write_lock;
    use crate::cli::Cli;

    fn requires_lock(args: &[&str]) -> bool {
        let cli = Cli::try_parse_from(args).expect("cli should parse");
        command_requires_write_lock(&cli.command)
    }

    #[test]
    fn mutating_commands_take_the_write_lock() {
        assert!(requires_lock(&["ortho", "import", "records.jsonl"]));
        assert!(requires_lock(&["ortho", "regenerate"]));
        assert!(requires_lock(&["ortho", "reset", "--yes"]));
    }

    #[test]
    fn readers_do_not_lock() {
        assert!(!requires_lock(&["ortho", "risk"]));
        assert!(!requires_lock(&["ortho", "score", "--age", "10", "--condition", "1"]));
        assert!(!requires_lock(&["ortho", "timing", "--age", "30"]));
    }
}

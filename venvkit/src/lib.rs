//! venvkit CLI library, shared by the venvkit and venvkit-rm binaries.

pub mod cli;
pub mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, RemoveCli};
use commands::Context;

/// Run `venvkit`: parse args and dispatch to command handlers.
pub fn run_cli() -> Result<()> {
    venvkit_core::observability::init_tracing();
    let cli = Cli::parse();
    let ctx = Context::from_env(cli.yes);
    tracing::debug!(command = ?cli.command, home = %ctx.store.home().display(), "venvkit");

    match cli.command {
        None => commands::env::cmd_setup(&ctx)?,
        Some(Commands::Name) => commands::env::cmd_name(&ctx)?,
        Some(Commands::Create { python }) => commands::env::cmd_create(&ctx, python.as_deref())?,
        Some(Commands::List) => commands::env::cmd_list(&ctx)?,
        Some(Commands::Use { env_id, shell }) => commands::env::cmd_use(&ctx, &env_id, shell)?,
        Some(Commands::Deactivate { shell }) => commands::env::cmd_deactivate(shell),
        Some(Commands::Delete { env_id }) => commands::env::cmd_delete(&ctx, &env_id)?,
        Some(Commands::Sync) => commands::deps::cmd_sync(&ctx)?,
        Some(Commands::Install) => commands::deps::cmd_install(&ctx)?,
        Some(Commands::Validate) => commands::deps::cmd_validate(&ctx)?,
        Some(Commands::Release {
            version,
            formula,
            url_template,
            push,
            remote,
            repo_dir,
            reset,
        }) => commands::release::cmd_release(commands::release::ReleaseArgs {
            version,
            formula,
            url_template,
            push,
            remote,
            repo_dir,
            reset,
        })?,
    }
    Ok(())
}

/// Run `venvkit-rm <ENV_ID>`: the delete path of `venvkit delete`.
pub fn run_remove() -> Result<()> {
    venvkit_core::observability::init_tracing();
    let cli = RemoveCli::parse();
    let ctx = Context::from_env(cli.yes);
    commands::env::cmd_delete(&ctx, &cli.env_id)
}

//! Environment commands: name, create, list, use, deactivate, delete and the
//! default setup workflow.

use anyhow::{Context as _, Result};

use venvkit_core::naming::{self, EnvId};
use venvkit_core::project::Project;
use venvkit_env::lifecycle::{self, Outcome};
use venvkit_env::{Activation, EnvRecord, EnvStatus, PythonBackend, Shell};

use super::prompt::confirm;
use super::Context;
use crate::cli::ShellKind;

fn shell(kind: ShellKind) -> Shell {
    match kind {
        ShellKind::Sh => Shell::Posix,
        ShellKind::Fish => Shell::Fish,
    }
}

fn current_env(ctx: &Context) -> Result<(Project, EnvId, String)> {
    let project = Project::current()?;
    let (id, version) = project.env_id(&ctx.python.default_version)?;
    Ok((project, id, version))
}

fn recreate_question(record: &EnvRecord) -> String {
    format!(
        "Environment '{}' already exists ({}) at {}. Destroy and recreate it?",
        record.id,
        record.status.label(),
        record.path.display()
    )
}

/// `venvkit name`
pub fn cmd_name(ctx: &Context) -> Result<()> {
    let (_, id, _) = current_env(ctx)?;
    println!("{}", id);
    Ok(())
}

/// `venvkit create [--python X.Y]`
pub fn cmd_create(ctx: &Context, python: Option<&str>) -> Result<()> {
    let project = Project::current()?;
    if let Some(version) = python {
        // The marker only changes once the requested interpreter is known to exist.
        ctx.backend().resolve_interpreter(&naming::major_minor(version)?)?;
        std::fs::write(project.marker_path(), format!("{}\n", version))
            .with_context(|| format!("Failed to write {}", project.marker_path().display()))?;
    }
    let (id, version) = project.env_id(&ctx.python.default_version)?;

    let outcome = lifecycle::create(&ctx.store, &ctx.backend(), &id, &version, |record| {
        Ok(confirm(&recreate_question(record), ctx.assume_yes)?)
    })?;
    match outcome {
        Outcome::Done(record) => {
            eprintln!("✓ Created {} at {}", record.id, record.path.display());
            eprintln!("  Activate with: eval \"$(venvkit use {})\"", record.id);
        }
        Outcome::Cancelled => eprintln!("Cancelled."),
    }
    Ok(())
}

/// `venvkit list`
pub fn cmd_list(ctx: &Context) -> Result<()> {
    let records = lifecycle::list(&ctx.store)?;
    for record in &records {
        println!("{:<40} {}", record.id.as_str(), record.status.label());
    }
    Ok(())
}

/// `venvkit use <ENV_ID>`: prints the activation snippet for `eval`.
pub fn cmd_use(ctx: &Context, env_id: &str, kind: ShellKind) -> Result<()> {
    let id = EnvId::parse(env_id)?;
    let activation = lifecycle::activate(&ctx.store, &id)?;
    print!("{}", activation.render(shell(kind)));
    Ok(())
}

/// `venvkit deactivate`
pub fn cmd_deactivate(kind: ShellKind) {
    print!("{}", Activation::render_deactivate(shell(kind)));
}

/// `venvkit delete <ENV_ID>` and `venvkit-rm <ENV_ID>`
pub fn cmd_delete(ctx: &Context, env_id: &str) -> Result<()> {
    let id = EnvId::parse(env_id)?;
    let outcome = lifecycle::delete(&ctx.store, &id, |record| {
        let question = format!(
            "Delete environment '{}' and its dependency lists from {}?",
            record.id,
            ctx.store.home().display()
        );
        Ok(confirm(&question, ctx.assume_yes)?)
    })?;
    match outcome {
        Outcome::Done(()) => eprintln!("✓ Deleted {}", id),
        Outcome::Cancelled => eprintln!("Cancelled."),
    }
    Ok(())
}

/// `venvkit` with no subcommand: create if needed, sync, install.
pub fn cmd_setup(ctx: &Context) -> Result<()> {
    let (project, id, version) = current_env(ctx)?;
    let backend = ctx.backend();
    eprintln!("Project {} (Python {}) -> {}", project.name, version, id);

    match ctx.store.status(&id) {
        EnvStatus::Ready => eprintln!("✓ Using existing environment {}", id),
        EnvStatus::Absent | EnvStatus::Incomplete => {
            let outcome = lifecycle::create(&ctx.store, &backend, &id, &version, |record| {
                Ok(confirm(&recreate_question(record), ctx.assume_yes)?)
            })?;
            match outcome {
                Outcome::Done(record) => eprintln!("✓ Created {}", record.path.display()),
                Outcome::Cancelled => {
                    eprintln!("Cancelled.");
                    return Ok(());
                }
            }
        }
    }

    super::deps::sync_and_install(ctx, &project, &id, &backend)?;
    eprintln!("  Activate with: eval \"$(venvkit use {})\"", id);
    Ok(())
}


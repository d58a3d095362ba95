//! Dependency commands: sync, install, validate.

use anyhow::Result;

use venvkit_core::naming::EnvId;
use venvkit_core::project::Project;
use venvkit_env::deps::{self, ValidateOutcome};
use venvkit_env::PythonBackend;

use super::Context;

fn current(ctx: &Context) -> Result<(Project, EnvId)> {
    let project = Project::current()?;
    let (id, _) = project.env_id(&ctx.python.default_version)?;
    Ok((project, id))
}

/// `venvkit sync`
pub fn cmd_sync(ctx: &Context) -> Result<()> {
    let (project, id) = current(ctx)?;
    let report = deps::sync(&ctx.store, &id, &project.manifest_path())?;
    eprintln!(
        "✓ Synced {} runtime dependencies and {} optional group(s) for {}",
        report.runtime_count, report.group_count, id
    );
    eprintln!("  {}", report.runtime_file.display());
    eprintln!("  {}", report.dev_file.display());
    Ok(())
}

/// `venvkit install`
pub fn cmd_install(ctx: &Context) -> Result<()> {
    let (_, id) = current(ctx)?;
    let report = deps::install(&ctx.store, &ctx.backend(), &id)?;
    if report.dev_installed {
        eprintln!("✓ Installed runtime and development dependencies into {}", id);
    } else {
        eprintln!("⚠ Installed runtime dependencies only into {} (development list missing)", id);
    }
    Ok(())
}

/// `venvkit validate`
pub fn cmd_validate(ctx: &Context) -> Result<()> {
    let (project, id) = current(ctx)?;
    let outcome = deps::validate(&ctx.store, &ctx.backend(), &id, &project.manifest_path())?;
    match outcome {
        ValidateOutcome::UpToDate => eprintln!("✓ Dependencies for {} are up to date", id),
        ValidateOutcome::Synced => eprintln!("✓ Dependencies for {} synced and installed", id),
        ValidateOutcome::Resynced => {
            eprintln!("✓ pyproject.toml changed; dependencies for {} re-synced and installed", id)
        }
    }
    Ok(())
}

/// Sync then install; used by the default workflow.
pub fn sync_and_install<B>(ctx: &Context, project: &Project, id: &EnvId, backend: &B) -> Result<()>
where
    B: PythonBackend + ?Sized,
{
    let report = deps::sync(&ctx.store, id, &project.manifest_path())?;
    eprintln!(
        "✓ Synced {} runtime dependencies and {} optional group(s)",
        report.runtime_count, report.group_count
    );
    let installed = deps::install(&ctx.store, backend, id)?;
    if !installed.dev_installed {
        eprintln!("⚠ Development list missing; installed runtime dependencies only");
    }
    eprintln!("✓ Dependencies installed into {}", id);
    Ok(())
}

//! `venvkit release <VERSION>`

use anyhow::{bail, Context as _, Result};
use std::path::PathBuf;

use venvkit_core::config::ReleaseConfig;
use venvkit_release::state::StateFile;
use venvkit_release::{version, workflow, GitCli, HttpArchive, ReleaseOptions};

pub struct ReleaseArgs {
    pub version: String,
    pub formula: Option<PathBuf>,
    pub url_template: Option<String>,
    pub push: bool,
    pub remote: Option<String>,
    pub repo_dir: PathBuf,
    pub reset: bool,
}

pub fn cmd_release(args: ReleaseArgs) -> Result<()> {
    version::validate(&args.version)?;
    let cfg = ReleaseConfig::from_env();
    let Some(formula) = args.formula.or(cfg.formula) else {
        bail!("No formula given; pass --formula or set VENVKIT_FORMULA");
    };
    // git runs inside the repo, so every path handed to it must not depend on our cwd.
    let repo_dir = std::path::absolute(&args.repo_dir)
        .with_context(|| format!("Invalid --repo-dir {}", args.repo_dir.display()))?;
    let formula = if formula.is_relative() {
        repo_dir.join(formula)
    } else {
        formula
    };

    let opts = ReleaseOptions {
        version: args.version,
        formula,
        url_template: args.url_template.or(cfg.url_template),
        push: args.push,
        remote: args.remote.unwrap_or(cfg.remote),
        state: StateFile::default_for(&repo_dir),
        reset: args.reset,
    };

    let vcs = GitCli::new(&repo_dir);
    let report = workflow::run(&opts, &vcs, &HttpArchive)?;

    if let Some(step) = report.resumed_after {
        eprintln!("Resumed after step '{}'", step.label());
    }
    eprintln!("✓ Released {} ({})", report.version, report.tag);
    eprintln!("  url:    {}", report.url);
    eprintln!("  sha256: {}", report.sha256);
    if !opts.push {
        eprintln!("  Not pushed; rerun with --push or push {} manually", report.tag);
    }
    Ok(())
}

//! Version control operations used by a release.

use std::path::{Path, PathBuf};
use std::process::Command;

use venvkit_core::{Error, Result};

pub trait Vcs {
    fn tag_exists(&self, tag: &str) -> Result<bool>;
    /// Stage `paths` and commit them with `message`.
    fn commit(&self, paths: &[&Path], message: &str) -> Result<()>;
    /// Annotated tag at HEAD.
    fn create_tag(&self, tag: &str, message: &str) -> Result<()>;
    fn push(&self, remote: &str, refspecs: &[&str]) -> Result<()>;
}

/// `git` on PATH, run inside `repo_dir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    pub repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.repo_dir);
        cmd
    }

    /// Paths under `repo_dir` are passed to git relative to it; git runs
    /// with `repo_dir` as its working directory.
    fn repo_relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.repo_dir).unwrap_or(path)
    }

    fn run(&self, mut cmd: Command, what: &str) -> Result<()> {
        tracing::debug!(repo = %self.repo_dir.display(), "git {}", what);
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                program: format!("git {}", what),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Vcs for GitCli {
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        let status = self
            .git()
            .args(["rev-parse", "--quiet", "--verify"])
            .arg(format!("refs/tags/{}", tag))
            .output()?
            .status;
        Ok(status.success())
    }

    fn commit(&self, paths: &[&Path], message: &str) -> Result<()> {
        let mut add = self.git();
        add.arg("add")
            .arg("--")
            .args(paths.iter().map(|p| self.repo_relative(p)));
        self.run(add, "add")?;

        let mut commit = self.git();
        commit.args(["commit", "-m", message]);
        self.run(commit, "commit")
    }

    fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        let mut cmd = self.git();
        cmd.args(["tag", "-a", tag, "-m", message]);
        self.run(cmd, "tag")
    }

    fn push(&self, remote: &str, refspecs: &[&str]) -> Result<()> {
        let mut cmd = self.git();
        cmd.arg("push").arg(remote).args(refspecs);
        self.run(cmd, "push")
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// venvkit - centralized Python virtual environments, one per project and interpreter version
///
/// Without a subcommand, sets up the current project: creates its environment
/// if needed, syncs dependency lists from pyproject.toml and installs them.
#[derive(Parser, Debug)]
#[command(name = "venvkit")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Answer yes to every confirmation prompt (also VENVKIT_ASSUME_YES=1)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the environment identifier for the current project
    Name,

    /// Create (or recreate) the current project's environment
    Create {
        /// Interpreter version to use; written to .python-version
        #[arg(long, value_name = "X.Y")]
        python: Option<String>,
    },

    /// List environments and whether each is ready or incomplete
    List,

    /// Print a shell snippet that activates an environment
    ///
    /// Usage: eval "$(venvkit use myproj_python3.12)"
    Use {
        #[arg(value_name = "ENV_ID")]
        env_id: String,

        #[arg(long, value_enum, default_value = "sh")]
        shell: ShellKind,
    },

    /// Print a shell snippet that undoes `venvkit use`
    ///
    /// Usage: eval "$(venvkit deactivate)"
    Deactivate {
        #[arg(long, value_enum, default_value = "sh")]
        shell: ShellKind,
    },

    /// Delete an environment and its dependency lists
    Delete {
        #[arg(value_name = "ENV_ID")]
        env_id: String,
    },

    /// Regenerate requirements files from pyproject.toml
    Sync,

    /// Install the synced requirements into the current project's environment
    Install,

    /// Sync and install when the requirements files are missing or stale
    Validate,

    /// Bump a Homebrew formula to VERSION, tag v<VERSION> and record the archive checksum
    Release {
        /// Release version, MAJOR.MINOR.PATCH
        #[arg(value_name = "VERSION")]
        version: String,

        /// Formula file, relative to --repo-dir unless absolute
        #[arg(long, value_name = "FILE", env = "VENVKIT_FORMULA")]
        formula: Option<PathBuf>,

        /// Archive URL with a {version} placeholder (default: the formula's
        /// current url with the version swapped)
        #[arg(long, value_name = "URL", env = "VENVKIT_URL_TEMPLATE")]
        url_template: Option<String>,

        /// Push the tag and commits
        #[arg(long, default_value = "false")]
        push: bool,

        /// Remote to push to (default: origin)
        #[arg(long, env = "VENVKIT_GIT_REMOTE")]
        remote: Option<String>,

        /// Git working tree
        #[arg(long, value_name = "DIR", default_value = ".")]
        repo_dir: PathBuf,

        /// Abandon a recorded in-progress release of another version
        #[arg(long, default_value = "false")]
        reset: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ShellKind {
    /// bash, zsh and other POSIX shells
    Sh,
    Fish,
}

/// venvkit-rm - delete a venvkit environment by identifier
#[derive(Parser, Debug)]
#[command(name = "venvkit-rm")]
#[command(author, version, about, long_about = None)]
pub struct RemoveCli {
    #[arg(value_name = "ENV_ID")]
    pub env_id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

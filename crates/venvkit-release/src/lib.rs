//! Homebrew formula release automation.
//!
//! Bumps `version`/`url` in a formula, commits, tags `v<version>`, pushes,
//! downloads the tagged archive and records its SHA-256. Progress is kept in
//! a small JSON state file so an interrupted release resumes where it stopped.

pub mod archive;
pub mod checksum;
pub mod descriptor;
pub mod state;
pub mod vcs;
pub mod version;
pub mod workflow;

pub use archive::{ArchiveSource, HttpArchive};
pub use vcs::{GitCli, Vcs};
pub use workflow::{ReleaseOptions, ReleaseReport, ReleaseStep};

//! The release sequence.
//!
//! `validate version -> ensure tag absent -> update version/url -> commit ->
//! tag -> push tag -> checksum -> update sha256 -> commit -> push`
//!
//! Each step halts the run on failure. Completed steps are recorded in the
//! [`StateFile`], and a re-run for the same version skips them, so a tag that
//! was already created is never re-created. Nothing is rolled back.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use venvkit_core::observability;
use venvkit_core::{Error, Result};

use crate::archive::ArchiveSource;
use crate::checksum;
use crate::descriptor::Descriptor;
use crate::state::{ReleaseState, StateFile};
use crate::vcs::Vcs;
use crate::version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStep {
    UpdateVersion,
    CommitVersion,
    Tag,
    PushTag,
    ComputeChecksum,
    UpdateChecksum,
    CommitChecksum,
    Push,
}

impl ReleaseStep {
    pub const ALL: [ReleaseStep; 8] = [
        ReleaseStep::UpdateVersion,
        ReleaseStep::CommitVersion,
        ReleaseStep::Tag,
        ReleaseStep::PushTag,
        ReleaseStep::ComputeChecksum,
        ReleaseStep::UpdateChecksum,
        ReleaseStep::CommitChecksum,
        ReleaseStep::Push,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReleaseStep::UpdateVersion => "update_version",
            ReleaseStep::CommitVersion => "commit_version",
            ReleaseStep::Tag => "tag",
            ReleaseStep::PushTag => "push_tag",
            ReleaseStep::ComputeChecksum => "compute_checksum",
            ReleaseStep::UpdateChecksum => "update_checksum",
            ReleaseStep::CommitChecksum => "commit_checksum",
            ReleaseStep::Push => "push",
        }
    }

    fn needs_push(self) -> bool {
        matches!(self, ReleaseStep::PushTag | ReleaseStep::Push)
    }
}

#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    pub version: String,
    pub formula: PathBuf,
    /// Archive URL with a `{version}` placeholder. When None, the formula's
    /// current `url` is reused with the old version swapped for the new one.
    pub url_template: Option<String>,
    pub push: bool,
    pub remote: String,
    pub state: StateFile,
    /// Discard a recorded in-progress release for another version.
    pub reset: bool,
}

#[derive(Debug, Clone)]
pub struct ReleaseReport {
    pub version: String,
    pub tag: String,
    pub url: String,
    pub sha256: String,
    /// Last step already completed by an earlier run, if this run resumed.
    pub resumed_after: Option<ReleaseStep>,
    pub executed: Vec<ReleaseStep>,
}

/// Run (or resume) a release.
pub fn run<V, A>(opts: &ReleaseOptions, vcs: &V, archive: &A) -> Result<ReleaseReport>
where
    V: Vcs + ?Sized,
    A: ArchiveSource + ?Sized,
{
    version::validate(&opts.version)?;

    if opts.reset {
        opts.state.clear()?;
    }
    let mut state = match opts.state.load()? {
        Some(s) if s.version == opts.version => s,
        Some(s) => return Err(Error::ReleaseInProgress { version: s.version }),
        None => ReleaseState::new(&opts.version),
    };
    let resumed_after = state.last_completed();
    if let Some(step) = resumed_after {
        tracing::info!(version = %opts.version, "Resuming release after {}", step.label());
    }

    let tag = version::tag_name(&opts.version);
    if !state.is_done(ReleaseStep::Tag) && vcs.tag_exists(&tag)? {
        return Err(Error::TagAlreadyExists(tag));
    }

    let descriptor = Descriptor::new(&opts.formula);
    let url = if state.is_done(ReleaseStep::UpdateVersion) {
        descriptor.field("url")?
    } else {
        release_url(opts.url_template.as_deref(), &descriptor, &opts.version)?
    };

    let mut executed = Vec::new();
    for step in ReleaseStep::ALL {
        if state.is_done(step) || (step.needs_push() && !opts.push) {
            continue;
        }
        tracing::info!(version = %opts.version, step = step.label(), "Release step");
        match step {
            ReleaseStep::UpdateVersion => {
                descriptor.set_fields(&[("version", opts.version.as_str()), ("url", url.as_str())])?;
            }
            ReleaseStep::CommitVersion => {
                vcs.commit(
                    &[descriptor.path()],
                    &format!("Bump formula to {}", opts.version),
                )?;
            }
            ReleaseStep::Tag => {
                vcs.create_tag(&tag, &format!("Release {}", tag))?;
            }
            ReleaseStep::PushTag => {
                vcs.push(&opts.remote, &["HEAD", tag.as_str()])?;
            }
            ReleaseStep::ComputeChecksum => {
                state.checksum = Some(checksum::archive_sha256(archive, &url)?);
            }
            ReleaseStep::UpdateChecksum => {
                let sha = state.checksum.clone().ok_or_else(|| Error::ChecksumFailure {
                    url: url.clone(),
                    reason: "no checksum recorded".to_string(),
                })?;
                descriptor.set_fields(&[("sha256", sha.as_str())])?;
            }
            ReleaseStep::CommitChecksum => {
                vcs.commit(
                    &[descriptor.path()],
                    &format!("Update sha256 for {}", tag),
                )?;
            }
            ReleaseStep::Push => {
                vcs.push(&opts.remote, &["HEAD"])?;
            }
        }
        state.mark_done(step);
        opts.state.save(&state)?;
        observability::audit_release_step(&opts.version, step.label());
        executed.push(step);
    }

    let sha256 = match state.checksum.clone() {
        Some(s) => s,
        None => descriptor.field("sha256")?,
    };
    opts.state.clear()?;

    Ok(ReleaseReport {
        version: opts.version.clone(),
        tag,
        url,
        sha256,
        resumed_after,
        executed,
    })
}

/// Archive URL for `version`.
pub fn release_url(template: Option<&str>, descriptor: &Descriptor, version: &str) -> Result<String> {
    if let Some(template) = template {
        return Ok(template.replace("{version}", version));
    }
    let current_url = descriptor.field("url")?;
    let current_version = descriptor.field("version")?;
    if current_version.is_empty() {
        return Ok(current_url);
    }
    Ok(current_url.replace(&current_version, version))
}

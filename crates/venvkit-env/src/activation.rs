//! Activation as a value.
//!
//! A child process cannot change its parent shell, so activation is returned
//! as data (paths to prepend, prompt label). The CLI renders it as a snippet
//! for `eval`, and [`Activation::apply`] applies it to a subprocess.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

use venvkit_core::naming::EnvId;
use venvkit_core::Result;

use crate::store;

/// Saved `PATH` from before activation; its presence means "active".
const OLD_PATH_VAR: &str = "_VENVKIT_OLD_PATH";
const OLD_PS1_VAR: &str = "_VENVKIT_OLD_PS1";
const ACTIVE_ENV_VAR: &str = "VENVKIT_ACTIVE_ENV";
/// Prompt label, read by the fish prompt wrapper and by prompt themes.
const PROMPT_VAR: &str = "VIRTUAL_ENV_PROMPT";
/// Copy of the user's `fish_prompt` while an environment is active.
const OLD_FISH_PROMPT_FN: &str = "_venvkit_old_fish_prompt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// bash, zsh, dash
    Posix,
    Fish,
}

#[derive(Debug, Clone)]
pub struct Activation {
    pub env_id: EnvId,
    pub env_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub prompt_label: String,
}

impl Activation {
    pub fn new(env_id: EnvId, env_dir: PathBuf) -> Self {
        let bin_dir = store::bin_dir(&env_dir);
        let prompt_label = format!("({}) ", env_id);
        Self {
            env_id,
            env_dir,
            bin_dir,
            prompt_label,
        }
    }

    pub fn python(&self) -> PathBuf {
        store::python_executable(&self.env_dir)
    }

    /// `bin_dir` prepended to `current`.
    pub fn path_with(&self, current: Option<&OsStr>) -> Result<OsString> {
        let mut parts = vec![self.bin_dir.clone()];
        if let Some(current) = current {
            parts.extend(std::env::split_paths(current));
        }
        std::env::join_paths(parts).map_err(|e| {
            venvkit_core::Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })
    }

    /// Apply to a subprocess: `VIRTUAL_ENV`, `PATH`, no `PYTHONHOME`.
    pub fn apply(&self, cmd: &mut Command) -> Result<()> {
        let path = self.path_with(std::env::var_os("PATH").as_deref())?;
        cmd.env("VIRTUAL_ENV", &self.env_dir)
            .env("PATH", path)
            .env(ACTIVE_ENV_VAR, self.env_id.as_str())
            .env_remove("PYTHONHOME");
        Ok(())
    }

    /// Shell snippet that activates this environment when `eval`ed.
    /// Re-activating restores the saved `PATH`/prompt first so nothing stacks.
    pub fn render(&self, shell: Shell) -> String {
        let env_dir = self.env_dir.to_string_lossy();
        let bin_dir = self.bin_dir.to_string_lossy();
        match shell {
            Shell::Posix => {
                let mut s = String::new();
                s.push_str(&format!(
                    "if [ -n \"${{{old}+x}}\" ]; then PATH=\"${old}\"; PS1=\"${{{ps1}-}}\"; fi\n",
                    old = OLD_PATH_VAR,
                    ps1 = OLD_PS1_VAR
                ));
                s.push_str(&format!("{}=\"$PATH\"; export {}\n", OLD_PATH_VAR, OLD_PATH_VAR));
                s.push_str(&format!("{}=\"${{PS1-}}\"; export {}\n", OLD_PS1_VAR, OLD_PS1_VAR));
                s.push_str(&format!("VIRTUAL_ENV={}; export VIRTUAL_ENV\n", posix_quote(&env_dir)));
                s.push_str(&format!(
                    "{}={}; export {}\n",
                    ACTIVE_ENV_VAR,
                    posix_quote(self.env_id.as_str()),
                    ACTIVE_ENV_VAR
                ));
                s.push_str(&format!("PATH={}:\"$PATH\"; export PATH\n", posix_quote(&bin_dir)));
                s.push_str(&format!(
                    "{}={}; export {}\n",
                    PROMPT_VAR,
                    posix_quote(&self.prompt_label),
                    PROMPT_VAR
                ));
                s.push_str(&format!("PS1={}\"${{PS1-}}\"\n", posix_quote(&self.prompt_label)));
                s.push_str("hash -r 2>/dev/null || true\n");
                s
            }
            Shell::Fish => {
                let mut s = String::new();
                s.push_str(&format!(
                    "if set -q {old}; set -gx PATH ${old}; end\n",
                    old = OLD_PATH_VAR
                ));
                s.push_str(&restore_fish_prompt());
                s.push_str(&format!("set -gx {} $PATH\n", OLD_PATH_VAR));
                s.push_str(&format!("set -gx VIRTUAL_ENV {}\n", fish_quote(&env_dir)));
                s.push_str(&format!(
                    "set -gx {} {}\n",
                    ACTIVE_ENV_VAR,
                    fish_quote(self.env_id.as_str())
                ));
                s.push_str(&format!("set -gx PATH {} $PATH\n", fish_quote(&bin_dir)));
                s.push_str(&format!(
                    "set -gx {} {}\n",
                    PROMPT_VAR,
                    fish_quote(&self.prompt_label)
                ));
                s.push_str(&format!(
                    "if functions -q fish_prompt; functions -c fish_prompt {old_fn}; end\n",
                    old_fn = OLD_FISH_PROMPT_FN
                ));
                s.push_str(&format!(
                    "function fish_prompt; printf '%s' ${var}; if functions -q {old_fn}; {old_fn}; end; end\n",
                    var = PROMPT_VAR,
                    old_fn = OLD_FISH_PROMPT_FN
                ));
                s
            }
        }
    }

    /// Snippet that reverses [`Activation::render`]. A no-op when nothing is active.
    pub fn render_deactivate(shell: Shell) -> String {
        match shell {
            Shell::Posix => format!(
                "if [ -n \"${{{old}+x}}\" ]; then\n  PATH=\"${old}\"; export PATH\n  PS1=\"${{{ps1}-}}\"\n  unset {old} {ps1} VIRTUAL_ENV {active} {prompt}\n  hash -r 2>/dev/null || true\nfi\n",
                old = OLD_PATH_VAR,
                ps1 = OLD_PS1_VAR,
                active = ACTIVE_ENV_VAR,
                prompt = PROMPT_VAR
            ),
            Shell::Fish => format!(
                "if set -q {old}\n  set -gx PATH ${old}\n  set -e {old}\n  set -e VIRTUAL_ENV\n  set -e {active}\n  set -e {prompt}\nend\n{restore}",
                old = OLD_PATH_VAR,
                active = ACTIVE_ENV_VAR,
                prompt = PROMPT_VAR,
                restore = restore_fish_prompt()
            ),
        }
    }
}

/// Put the user's `fish_prompt` back if an activation wrapped it.
fn restore_fish_prompt() -> String {
    format!(
        "if functions -q {old_fn}; functions -e fish_prompt; functions -c {old_fn} fish_prompt; functions -e {old_fn}; end\n",
        old_fn = OLD_FISH_PROMPT_FN
    )
}

fn posix_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

fn fish_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn activation() -> Activation {
        Activation::new(
            EnvId::parse("demo_python3.12").unwrap(),
            PathBuf::from("/home/u/.venvs/envs/demo_python3.12"),
        )
    }

    #[test]
    fn test_prompt_label_and_bin_dir() {
        let a = activation();
        assert_eq!(a.prompt_label, "(demo_python3.12) ");
        assert!(a.bin_dir.starts_with(&a.env_dir));
    }

    #[test]
    fn test_path_with_prepends_bin_dir() {
        let a = activation();
        let joined = a.path_with(Some(OsStr::new("/usr/bin"))).unwrap();
        let parts: Vec<PathBuf> = std::env::split_paths(&joined).collect();
        assert_eq!(parts[0], a.bin_dir);
        assert_eq!(parts[1], Path::new("/usr/bin"));
    }

    #[test]
    fn test_render_posix_exports() {
        let script = activation().render(Shell::Posix);
        assert!(script.contains("VIRTUAL_ENV='/home/u/.venvs/envs/demo_python3.12'; export VIRTUAL_ENV"));
        assert!(script.contains("PS1='(demo_python3.12) '\"${PS1-}\""));
        assert!(script.contains("_VENVKIT_OLD_PATH=\"$PATH\""));
    }

    #[test]
    fn test_render_deactivate_restores_path() {
        let script = Activation::render_deactivate(Shell::Posix);
        assert!(script.contains("PATH=\"$_VENVKIT_OLD_PATH\""));
        assert!(script.contains("unset _VENVKIT_OLD_PATH"));
        let fish = Activation::render_deactivate(Shell::Fish);
        assert!(fish.contains("set -e VIRTUAL_ENV"));
    }

    #[test]
    fn test_render_fish_sets_prompt_indicator() {
        let script = activation().render(Shell::Fish);
        assert!(script.contains("set -gx VIRTUAL_ENV_PROMPT '(demo_python3.12) '\n"));
        assert!(script.contains("functions -c fish_prompt _venvkit_old_fish_prompt"));
        assert!(script.contains("function fish_prompt; printf '%s' $VIRTUAL_ENV_PROMPT;"));
        // A second activation unwraps the previous prompt before wrapping again.
        let unwrap_at = script.find("functions -c _venvkit_old_fish_prompt fish_prompt").unwrap();
        let wrap_at = script.find("functions -c fish_prompt _venvkit_old_fish_prompt").unwrap();
        assert!(unwrap_at < wrap_at);

        let off = Activation::render_deactivate(Shell::Fish);
        assert!(off.contains("set -e VIRTUAL_ENV_PROMPT"));
        assert!(off.contains("functions -c _venvkit_old_fish_prompt fish_prompt"));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(posix_quote("it's"), "'it'\\''s'");
        assert_eq!(fish_quote("it's"), "'it\\'s'");
    }
}

//! Line-oriented field patching for formula files.
//!
//! Fields are matched by name at the start of a line (`  url "..."`) and the
//! whole line is replaced, so comments and layout elsewhere survive untouched.
//! Everything goes through [`patch_field`] / [`read_field`]; a structured
//! parser can replace them without touching callers.

use std::fs;
use std::path::{Path, PathBuf};

use venvkit_core::{Error, Result};

/// Replace the first `<field> ...` line with `<indent><field> "<value>"`.
/// Returns None when no line declares `field`.
pub fn patch_field(text: &str, field: &str, value: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + value.len());
    let mut patched = false;
    for line in text.split_inclusive('\n') {
        if !patched && declares(line, field) {
            let indent_len = line.len() - line.trim_start().len();
            let ending = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            out.push_str(&line[..indent_len]);
            out.push_str(&format!("{} \"{}\"", field, value));
            out.push_str(ending);
            patched = true;
        } else {
            out.push_str(line);
        }
    }
    patched.then_some(out)
}

/// Quoted value of the first `<field> "..."` line.
pub fn read_field(text: &str, field: &str) -> Option<String> {
    let line = text.lines().find(|l| declares(l, field))?;
    let rest = line.trim_start()[field.len()..].trim();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

fn declares(line: &str, field: &str) -> bool {
    line.trim_start()
        .strip_prefix(field)
        .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with('\t'))
}

/// A formula file on disk.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub path: PathBuf,
}

impl Descriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    pub fn field(&self, field: &str) -> Result<String> {
        read_field(&self.read()?, field).ok_or_else(|| self.missing(field))
    }

    /// Patch several fields in one read-modify-write.
    pub fn set_fields(&self, fields: &[(&str, &str)]) -> Result<()> {
        let mut text = self.read()?;
        for (field, value) in fields {
            text = patch_field(&text, field, value).ok_or_else(|| self.missing(field))?;
        }
        fs::write(&self.path, text)?;
        Ok(())
    }

    fn missing(&self, field: &str) -> Error {
        Error::FieldNotFound {
            field: field.to_string(),
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMULA: &str = r#"class Demo < Formula
  desc "Demo tool" # keep me
  homepage "https://example.com/demo"
  url "https://example.com/demo/archive/refs/tags/v1.0.0.tar.gz"
  sha256 "0000"
  version "1.0.0"
  license "MIT"

  def install
    bin.install "demo"
  end
end
"#;

    #[test]
    fn test_patch_field_preserves_other_lines() {
        let out = patch_field(FORMULA, "version", "1.2.3").unwrap();
        assert!(out.contains("  version \"1.2.3\"\n"));
        assert!(out.contains("  desc \"Demo tool\" # keep me\n"));
        assert_eq!(out.lines().count(), FORMULA.lines().count());
    }

    #[test]
    fn test_patch_field_matches_whole_name() {
        // `version_scheme` must not be mistaken for `version`.
        let text = "  version_scheme 1\n  version \"1.0.0\"\n";
        let out = patch_field(text, "version", "2.0.0").unwrap();
        assert_eq!(out, "  version_scheme 1\n  version \"2.0.0\"\n");
    }

    #[test]
    fn test_patch_missing_field() {
        assert!(patch_field(FORMULA, "mirror", "x").is_none());
    }

    #[test]
    fn test_read_field() {
        assert_eq!(read_field(FORMULA, "sha256").as_deref(), Some("0000"));
        assert_eq!(
            read_field(FORMULA, "url").as_deref(),
            Some("https://example.com/demo/archive/refs/tags/v1.0.0.tar.gz")
        );
        assert!(read_field(FORMULA, "mirror").is_none());
    }

    #[test]
    fn test_descriptor_set_fields_atomic_on_missing_field() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.rb");
        fs::write(&path, FORMULA).unwrap();
        let d = Descriptor::new(&path);

        let err = d.set_fields(&[("version", "2.0.0"), ("mirror", "x")]).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), FORMULA);

        d.set_fields(&[("version", "2.0.0"), ("sha256", "abcd")]).unwrap();
        assert_eq!(d.field("version").unwrap(), "2.0.0");
        assert_eq!(d.field("sha256").unwrap(), "abcd");
    }
}

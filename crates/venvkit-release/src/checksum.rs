//! SHA-256 of release archives.

use sha2::{Digest, Sha256};

use venvkit_core::{Error, Result};

use crate::archive::ArchiveSource;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Download `url` and hash it. Download errors and empty bodies are `ChecksumFailure`.
pub fn archive_sha256<A>(source: &A, url: &str) -> Result<String>
where
    A: ArchiveSource + ?Sized,
{
    let body = source.fetch(url).map_err(|e| Error::ChecksumFailure {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if body.is_empty() {
        return Err(Error::ChecksumFailure {
            url: url.to_string(),
            reason: "archive is empty".to_string(),
        });
    }
    Ok(sha256_hex(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Vec<u8>>);

    impl ArchiveSource for Fixed {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.0.clone().ok_or_else(|| Error::CommandFailed {
                program: format!("GET {}", url),
                stderr: "404".to_string(),
            })
        }
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_archive_sha256_empty_and_unreachable() {
        let empty = archive_sha256(&Fixed(Some(Vec::new())), "https://x/a.tar.gz");
        assert!(matches!(empty, Err(Error::ChecksumFailure { .. })));
        let missing = archive_sha256(&Fixed(None), "https://x/a.tar.gz");
        assert!(matches!(missing, Err(Error::ChecksumFailure { reason, .. }) if reason.contains("404")));
        let ok = archive_sha256(&Fixed(Some(b"abc".to_vec())), "https://x/a.tar.gz").unwrap();
        assert_eq!(ok.len(), 64);
    }
}

//! Release archive download.

use std::io::Read;

use venvkit_core::{Error, Result};

/// Source of release archive bytes.
pub trait ArchiveSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) download via `ureq`; redirects are followed.
#[derive(Debug, Clone, Default)]
pub struct HttpArchive;

impl ArchiveSource for HttpArchive {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!(url = %url, "Downloading release archive");
        let response = ureq::get(url).call().map_err(|e| Error::CommandFailed {
            program: format!("GET {}", url),
            stderr: e.to_string(),
        })?;
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok(body)
    }
}

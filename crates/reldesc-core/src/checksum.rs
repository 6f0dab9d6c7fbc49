//! SHA-256 of release assets.
//!
//! The remote variant streams the download straight into the hasher; nothing
//! is written to disk and the body is never held in memory as a whole.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::http::{self, CHUNK_SIZE};

/// Media type that makes GitHub serve the asset bytes rather than metadata.
const ACCEPT_BINARY: &str = "application/octet-stream";

/// Compute SHA-256 of everything `reader` yields, as lowercase hex.
pub fn sha256_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).context("read")?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute SHA-256 of a local file.
pub fn sha256_path(path: &Path) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    sha256_reader(f).with_context(|| format!("hash {}", path.display()))
}

/// Download `url` and compute SHA-256 of the body.
///
/// `authorization` is sent as the `Authorization` header when given. Redirects
/// are followed; a transport failure or non-2xx status is an error. No retry.
pub fn sha256_url(url: &str, authorization: Option<&str>) -> Result<String> {
    let mut headers = vec![("Accept", ACCEPT_BINARY)];
    if let Some(auth) = authorization {
        headers.push(("Authorization", auth));
    }

    let mut hasher = Sha256::new();
    let received = http::get_streaming(url, &headers, |chunk| hasher.update(chunk))
        .with_context(|| format!("download {} for checksum", url))?;
    let digest = hex::encode(hasher.finalize());
    tracing::debug!("hashed {} bytes from {}", received, url);
    Ok(digest)
}

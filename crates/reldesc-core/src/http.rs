//! Blocking GET helpers on libcurl easy handles.
//!
//! No overall timeout is set on these requests and nothing is retried; a
//! transport error or a non-2xx status is returned to the caller as is.

use anyhow::{Context, Result};

use crate::error::ReleaseError;

/// Sent on every request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = concat!("reldesc/", env!("CARGO_PKG_VERSION"));

/// Receive buffer size handed to libcurl, i.e. the largest chunk a sink sees.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Build a curl header list from `(name, value)` pairs.
pub(crate) fn header_list(headers: &[(&str, &str)]) -> Result<curl::easy::List> {
    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    Ok(list)
}

/// GET `url`, passing the body to `sink` chunk by chunk as it arrives.
///
/// Follows redirects. Returns the number of body bytes received. A non-2xx
/// final status fails with [`ReleaseError::HttpStatus`]; whatever the sink saw
/// before that should be discarded.
pub fn get_streaming<F>(url: &str, headers: &[(&str, &str)], mut sink: F) -> Result<u64>
where
    F: FnMut(&[u8]),
{
    let mut received = 0u64;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.buffer_size(CHUNK_SIZE)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            sink(data);
            received += data.len() as u64;
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        return Err(ReleaseError::HttpStatus {
            method: "GET",
            url: url.to_string(),
            code,
        }
        .into());
    }
    Ok(received)
}

/// GET `url` and collect the whole body in memory.
pub fn get_bytes(url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    get_streaming(url, headers, |chunk| body.extend_from_slice(chunk))?;
    Ok(body)
}

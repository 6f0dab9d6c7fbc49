//! HTTP HEAD probing.
//!
//! Uses the curl crate (libcurl) to check whether a URL answers and to read
//! its `Content-Length`. Unlike the GET helpers, the status is returned rather
//! than turned into an error; callers decide what counts as available.

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use crate::http::{header_list, USER_AGENT};

/// Result of a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResult {
    /// Status code of the final response.
    pub status: u32,
    /// Size in bytes, if the final response carried `Content-Length`.
    pub content_length: Option<u64>,
}

/// How a HEAD probe behaves.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    /// Applies to connecting and to the whole request.
    pub timeout: Duration,
    pub follow_redirects: bool,
}

/// Performs a HEAD request and returns the status and parsed headers.
///
/// Transport failures (DNS, refused connection, timeout) are errors; any HTTP
/// status, including 4xx/5xx, is a successful probe.
pub fn probe(url: &str, headers: &[(&str, &str)], opts: ProbeOptions) -> Result<HeadResult> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.useragent(USER_AGENT)?;
    easy.follow_location(opts.follow_redirects)?;
    easy.connect_timeout(opts.timeout)?;
    easy.timeout(opts.timeout)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer
            .perform()
            .with_context(|| format!("HEAD {} failed", url))?;
    }

    let status = easy.response_code().context("no response code")?;
    Ok(HeadResult {
        status,
        content_length: parse::content_length(&lines),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_error() {
        let opts = ProbeOptions {
            timeout: Duration::from_secs(2),
            follow_redirects: false,
        };
        assert!(probe("http://127.0.0.1:1/file.zip", &[], opts).is_err());
    }
}

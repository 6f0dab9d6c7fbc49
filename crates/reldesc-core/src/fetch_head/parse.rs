//! Parse HTTP response header lines collected during a HEAD probe.

/// `Content-Length` of the last response in `lines`.
///
/// With redirects followed, curl reports every hop's headers in order; each
/// `HTTP/` status line starts a new response, so earlier values are dropped.
pub(crate) fn content_length(lines: &[String]) -> Option<u64> {
    let mut content_length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_length = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    content_length
}

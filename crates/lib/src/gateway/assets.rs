//! Static assets referenced by template and image map replies.

use axum::http::{header, HeaderMap};
use std::path::{Path, PathBuf};

/// Origin for asset links: configured public URL, else forwarded/Host headers.
pub fn asset_base_url(public_base_url: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(url) = public_base_url.map(str::trim).filter(|s| !s.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    let scheme = first_value(headers, "X-Forwarded-Proto").unwrap_or("http");
    let host = first_value(headers, "X-Forwarded-Host")
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

/// First comma-separated entry of a header, trimmed.
fn first_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Map a request path under `/static` to a file inside `root`. Rejects parent traversal.
pub fn resolve_asset_path(root: &Path, rel: &str) -> Option<PathBuf> {
    let mut out = root.to_path_buf();
    let mut pushed = false;
    for seg in rel.split('/') {
        if seg.is_empty() || seg == "." {
            continue;
        }
        if seg == ".." || seg.contains('\\') {
            return None;
        }
        out.push(seg);
        pushed = true;
    }
    pushed.then_some(out)
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn configured_public_url_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        assert_eq!(
            asset_base_url(Some("https://bot.example.com/"), &headers),
            "https://bot.example.com"
        );
    }

    #[test]
    fn derives_from_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("bot.example.com"));
        assert_eq!(asset_base_url(None, &headers), "https://bot.example.com");
    }

    #[test]
    fn falls_back_to_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:8080"));
        assert_eq!(asset_base_url(Some("  "), &headers), "http://127.0.0.1:8080");
    }

    #[test]
    fn asset_paths_stay_inside_root() {
        let root = Path::new("/srv/static");
        assert_eq!(
            resolve_asset_path(root, "buttons/1040.jpg"),
            Some(PathBuf::from("/srv/static/buttons/1040.jpg"))
        );
        assert_eq!(resolve_asset_path(root, "../secret"), None);
        assert_eq!(resolve_asset_path(root, "rich/../../x"), None);
        assert_eq!(resolve_asset_path(root, ""), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a/1040.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("rich/1040")), "application/octet-stream");
    }
}

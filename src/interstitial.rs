//! Interstitial warning-page detection and bypass.
//!
//! Some download links resolve to an HTML confirmation page instead of file
//! bytes. The page is recognizable because a header-only preflight reports a
//! gzip content encoding rather than a binary content type; the real link
//! sits inside the page markup.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{MediafireError, Result};
use crate::http::HttpClient;

fn re_container() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?is)class\s*=\s*["']download_link["']"#).unwrap())
}

fn re_anchor_class_then_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<a\b[^>]*?class\s*=\s*["']input popsok["'][^>]*?href\s*=\s*["']([^"']+)["']"#,
        )
        .unwrap()
    })
}

fn re_anchor_href_then_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<a\b[^>]*?href\s*=\s*["']([^"']+)["'][^>]*?class\s*=\s*["']input popsok["']"#,
        )
        .unwrap()
    })
}

/// Extract the real download URL from interstitial page markup.
///
/// Looks for the `download_link` container and, within it, the anchor
/// carrying the `input popsok` class. Attribute order on the anchor is not
/// assumed. Returns `None` when the structure is absent (removed or flagged
/// file, or a page redesign).
pub fn extract_download_link(html: &str) -> Option<String> {
    let start = re_container().find(html)?.start();
    let scope = &html[start..];

    re_anchor_class_then_href()
        .captures(scope)
        .or_else(|| re_anchor_href_then_class().captures(scope))
        .map(|caps| caps[1].to_string())
}

/// Resolve the effective download URL for a link.
///
/// Direct links are returned unchanged. When the preflight indicates an
/// interstitial page, the page is fetched and the true link extracted from
/// it; [`MediafireError::BlockedOrMissing`] is returned when the expected
/// structure is not found.
pub async fn resolve_download_url(http: &HttpClient, url: &str) -> Result<String> {
    let encoding = http.head_content_encoding(url).await?;
    if encoding.as_deref() != Some("gzip") {
        return Ok(url.to_string());
    }

    let html = http.get_text(url).await?;
    extract_download_link(&html).ok_or_else(|| MediafireError::BlockedOrMissing {
        link: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="some other"></div>
        <div class="download_link">
          <a class="input popsok" aria-label="Download file"
             href="https://download1234.mediafire.com/realfile/key/x.bin">Download</a>
        </div>
        </body></html>"#;

    #[test]
    fn test_extract_link() {
        assert_eq!(
            extract_download_link(PAGE).unwrap(),
            "https://download1234.mediafire.com/realfile/key/x.bin"
        );
    }

    #[test]
    fn test_extract_link_href_before_class() {
        let page = r#"<div class="download_link">
            <a href="https://dl.example/y" class="input popsok">Download</a></div>"#;
        assert_eq!(extract_download_link(page).unwrap(), "https://dl.example/y");
    }

    #[test]
    fn test_extract_missing_container() {
        let page = r#"<a class="input popsok" href="https://dl.example/y">x</a>"#;
        assert!(extract_download_link(page).is_none());
    }

    #[test]
    fn test_extract_missing_anchor() {
        let page = r#"<div class="download_link"><span>File removed</span></div>"#;
        assert!(extract_download_link(page).is_none());
    }
}

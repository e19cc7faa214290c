//! Share link parsing and classification.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{MediafireError, Result};

/// What a share link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A single file (`file` and `file_premium` links behave identically)
    File,
    /// A folder tree
    Folder,
}

/// A parsed share reference: the kind and the key identifying the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Whether the link points at a file or a folder
    pub kind: LinkKind,
    /// The alphanumeric resource key extracted from the URL
    pub key: String,
}

fn share_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"mediafire\.com/(folder|file|file_premium)/([a-zA-Z0-9]+)").unwrap()
    })
}

/// Parse a MediaFire share URL.
///
/// Supports formats:
/// - `https://www.mediafire.com/file/KEY/...`
/// - `https://www.mediafire.com/file_premium/KEY/...`
/// - `https://www.mediafire.com/folder/KEY/...`
///
/// Purely lexical; performs no network I/O.
///
/// # Returns
/// A [`ShareLink`] on success, [`MediafireError::InvalidLink`] when the URL
/// does not match any supported shape.
pub fn parse_share_link(url: &str) -> Result<ShareLink> {
    let caps = share_link_regex()
        .captures(url)
        .ok_or_else(|| MediafireError::InvalidLink(url.to_string()))?;

    let kind = match &caps[1] {
        "folder" => LinkKind::Folder,
        _ => LinkKind::File,
    };

    Ok(ShareLink {
        kind,
        key: caps[2].to_string(),
    })
}

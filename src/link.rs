//! Link extraction for redirector-wrapped hrefs.
//!
//! The editor rewrites every external link into an intermediary URL whose
//! query string carries the true destination in a `q` parameter, e.g.
//! `https://www.google.com/url?q=http%3A%2F%2Fexample.com&sa=D`. This
//! module recovers the destination. Direct hrefs (`mailto:` and similar)
//! and internal comment-marker anchors are classified before extraction so
//! the extractor only ever sees candidate redirect wrappers.

use url::Url;

use crate::error::{Error, Result};

/// What an anchor's href means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrefKind {
    /// Same-document comment marker (`#cmnt...`); not a link at all.
    CommentMarker,
    /// Direct link with no query string (`mailto:` and similar); used
    /// verbatim, bypassing extraction.
    Direct,
    /// Candidate redirect wrapper; the destination must be extracted.
    Wrapped,
}

/// Classify an href before deciding whether to run extraction.
pub fn classify(href: &str) -> HrefKind {
    if href.starts_with("#cmnt") {
        HrefKind::CommentMarker
    } else if !href.contains('?') {
        HrefKind::Direct
    } else {
        HrefKind::Wrapped
    }
}

/// Recover the true destination from a redirect-wrapped href.
///
/// Fails with [`Error::MalformedLink`] when the href has no query string or
/// the query lacks a `q` parameter; both shapes mean the output link would
/// be silently wrong if passed through.
pub fn extract(href: &str) -> Result<String> {
    let url = Url::parse(href)
        .map_err(|e| Error::MalformedLink(format!("unparseable href {href:?}: {e}")))?;

    if url.query().is_none() {
        return Err(Error::MalformedLink(format!(
            "no query string in host link: {href}"
        )));
    }

    url.query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| Error::MalformedLink(format!("missing q parameter: {href}")))
}

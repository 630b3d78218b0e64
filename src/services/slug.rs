//! Tag slugs and route segment encoding.
//!
//! Slugs follow the rules of the site's original front-end slugger:
//! lowercase, strip punctuation and symbols, turn every space into `-`.
//! Letters, combining marks and digits outside ASCII are kept, so `随笔`
//! stays `随笔` and is percent-encoded only when placed in a URL.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Characters escaped when building a route segment.
///
/// Mirrors `encodeURI`: everything but ASCII alphanumerics and
/// `;,/?:@&=+$-_.!~*'()#` is escaped.
const ROUTE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("Route segment is not valid UTF-8 after decoding: {0}")]
    InvalidEncoding(String),
}

/// Everything a slug drops: anything but letters, marks, numbers,
/// connector punctuation, space and `-`.
fn disallowed() -> &'static Regex {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    DISALLOWED.get_or_init(|| {
        Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc} -]").expect("slug pattern is a valid regex")
    })
}

/// Normalize a tag for comparison and URLs.
pub fn slug(text: &str) -> String {
    disallowed()
        .replace_all(&text.to_lowercase(), "")
        .replace(' ', "-")
}

/// Percent-decode a raw route segment.
pub fn decode_route_segment(raw: &str) -> Result<String, SlugError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|_| SlugError::InvalidEncoding(raw.to_string()))
}

/// Percent-encode a tag for use as a route segment.
pub fn encode_route_segment(tag: &str) -> String {
    utf8_percent_encode(tag, ROUTE_SEGMENT).to_string()
}

/// Title shown above a tag listing: first letter uppercased, spaces in
/// the rest replaced by dashes.
pub fn tag_title(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace(' ', "-");
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

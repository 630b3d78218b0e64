//! Tag listing resolution.
//!
//! Given a tag and a page number, filter the post collection down to the
//! posts carrying that tag, newest first, and cut out the requested page.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::pagination::page_range;
use crate::models::{BlogConfig, CoreContent, Pagination, Post, TagSlug};
use crate::services::content_index::core_content;
use crate::services::slug::{decode_route_segment, tag_title, SlugError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagPageError {
    /// No post carries the tag; terminal for the request
    #[error("No posts tagged '{0}'")]
    NotFound(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    Slug(#[from] SlugError),
}

/// One page of a tag listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagPage {
    /// Heading for the listing
    pub title: String,
    /// Every matching post, newest first
    pub posts: Vec<CoreContent>,
    /// The slice of `posts` shown on this page
    pub display_posts: Vec<CoreContent>,
    pub pagination: Pagination,
}

/// Parse a 1-based page number from a route segment.
pub fn parse_page_number(raw: &str) -> Result<usize, TagPageError> {
    match raw.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(TagPageError::InvalidPage(raw.to_string())),
    }
}

/// Decode a raw (percent-encoded) route tag.
pub fn parse_route_tag(raw: &str) -> Result<TagSlug, TagPageError> {
    Ok(TagSlug::from_route(decode_route_segment(raw)?))
}

/// Resolve page `page` of the listing for `tag`.
///
/// `posts` is the full collection; it does not need to be sorted. Drafts
/// are hidden unless `options.include_drafts` is set. Returns
/// [`TagPageError::NotFound`] when nothing matches, whatever the page.
/// A page past the end is not an error and yields an empty
/// `display_posts`.
pub fn resolve_page(
    tag: &TagSlug,
    page: usize,
    posts: &[Post],
    options: &BlogConfig,
) -> Result<TagPage, TagPageError> {
    if page == 0 {
        return Err(TagPageError::InvalidPage(page.to_string()));
    }

    let mut matching: Vec<&Post> = posts
        .iter()
        .filter(|post| {
            post.tags
                .iter()
                .any(|label| TagSlug::from_label(label) == *tag)
        })
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));

    let filtered = core_content(matching, options.include_drafts);
    if filtered.is_empty() {
        tracing::debug!(tag = %tag, "No posts for tag");
        return Err(TagPageError::NotFound(tag.to_string()));
    }

    let range = page_range(page, options.posts_per_page, filtered.len());
    let display_posts = filtered[range].to_vec();
    let pagination = Pagination::new(page, filtered.len(), options.posts_per_page, tag.as_str());

    tracing::debug!(
        tag = %tag,
        page = page,
        matching = filtered.len(),
        shown = display_posts.len(),
        "Resolved tag page"
    );

    Ok(TagPage {
        title: tag_title(tag.as_str()),
        posts: filtered,
        display_posts,
        pagination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::content_index::tests::post;
    use pretty_assertions::assert_eq;

    fn options() -> BlogConfig {
        BlogConfig::default()
    }

    fn tag(s: &str) -> TagSlug {
        TagSlug::from_route(s)
    }

    /// 12 posts tagged "rust", one per month of 2023, plus noise.
    fn collection() -> Vec<Post> {
        let mut posts: Vec<Post> = (1..=12)
            .map(|m| post(&format!("rust-{m:02}"), (2023, m, 1), &["Rust"]))
            .collect();
        posts.push(post("js", (2023, 6, 15), &["JavaScript"]));
        posts.push(post("both", (2024, 1, 1), &["Rust", "Next.js"]));
        posts
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let posts = collection();
        let page = resolve_page(&tag("rust"), 1, &posts, &options()).unwrap();

        let expected: usize = posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t.eq_ignore_ascii_case("rust")))
            .count();
        assert_eq!(page.posts.len(), expected);
        assert!(page
            .posts
            .iter()
            .all(|p| p.tags.iter().any(|t| TagSlug::from_label(t) == tag("rust"))));
    }

    #[test]
    fn test_newest_first() {
        let page = resolve_page(&tag("rust"), 1, &collection(), &options()).unwrap();
        let slugs: Vec<_> = page.display_posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["both", "rust-12", "rust-11", "rust-10", "rust-09"]);
    }

    #[test]
    fn test_pagination_math() {
        let posts = collection();
        // 13 matching posts, 5 per page
        let first = resolve_page(&tag("rust"), 1, &posts, &options()).unwrap();
        assert_eq!(
            first.pagination,
            Pagination {
                current_page: 1,
                total_pages: 3,
                current_tag: "rust".to_string(),
            }
        );

        let last = resolve_page(&tag("rust"), 3, &posts, &options()).unwrap();
        assert_eq!(last.display_posts.len(), 3);
        assert_eq!(last.display_posts[0], last.posts[10]);
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let page = resolve_page(&tag("rust"), 9, &collection(), &options()).unwrap();
        assert!(page.display_posts.is_empty());
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, 9);
    }

    #[test]
    fn test_unknown_tag_not_found_for_any_page() {
        let posts = collection();
        for page in [1, 2, 100] {
            assert_eq!(
                resolve_page(&tag("haskell"), page, &posts, &options()),
                Err(TagPageError::NotFound("haskell".to_string()))
            );
        }
    }

    #[test]
    fn test_route_tag_is_compared_as_slug() {
        let posts = collection();
        assert!(resolve_page(&tag("nextjs"), 1, &posts, &options()).is_ok());
        assert!(resolve_page(&tag("Next.js"), 1, &posts, &options()).is_err());
    }

    #[test]
    fn test_drafts_only_tag_is_not_found() {
        let mut draft = post("wip", (2024, 2, 2), &["Zig"]);
        draft.draft = true;
        let posts = vec![draft];

        assert!(matches!(
            resolve_page(&tag("zig"), 1, &posts, &options()),
            Err(TagPageError::NotFound(_))
        ));

        let with_drafts = BlogConfig {
            include_drafts: true,
            ..BlogConfig::default()
        };
        assert_eq!(
            resolve_page(&tag("zig"), 1, &posts, &with_drafts)
                .unwrap()
                .posts
                .len(),
            1
        );
    }

    #[test]
    fn test_custom_page_size() {
        let options = BlogConfig {
            posts_per_page: 4,
            include_drafts: false,
        };
        let page = resolve_page(&tag("rust"), 2, &collection(), &options).unwrap();
        assert_eq!(page.display_posts.len(), 4);
        assert_eq!(page.pagination.total_pages, 4);
    }

    #[test]
    fn test_title() {
        let page = resolve_page(&tag("rust"), 1, &collection(), &options()).unwrap();
        assert_eq!(page.title, "Rust");
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number("1"), Ok(1));
        assert_eq!(parse_page_number("12"), Ok(12));
        assert!(parse_page_number("0").is_err());
        assert!(parse_page_number("-1").is_err());
        assert!(parse_page_number("two").is_err());
        assert!(parse_page_number("").is_err());
    }

    #[test]
    fn test_parse_route_tag_decodes() {
        assert_eq!(
            parse_route_tag("%E9%9A%8F%E7%AC%94").unwrap().as_str(),
            "随笔"
        );
        assert!(matches!(
            parse_route_tag("%C3"),
            Err(TagPageError::Slug(_))
        ));
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(matches!(
            resolve_page(&tag("rust"), 0, &collection(), &options()),
            Err(TagPageError::InvalidPage(_))
        ));
    }
}

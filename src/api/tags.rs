use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, PageMetadata, TagSlug};
use crate::services::tag_pages::{parse_page_number, resolve_page};
use crate::services::{ContentIndex, TagPage, TagPageParam, TagParam};

/// A resolved tag page together with its head metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct TagPageResponse {
    #[serde(flatten)]
    pub page: TagPage,
    pub metadata: PageMetadata,
}

/// Every route that a static build of the tag listings would emit
#[derive(Debug, Serialize, ToSchema)]
pub struct TagParamsResponse {
    /// One entry per tag
    pub tags: Vec<TagParam>,
    /// One entry per non-empty page of each tag
    pub pages: Vec<TagPageParam>,
}

/// List one page of posts carrying a tag
///
/// Posts are ordered newest first. A page past the end returns an empty
/// `displayPosts`; a tag with no published posts is a 404.
#[utoipa::path(
    get,
    path = "/blog/tags/{tag}/page/{page}",
    responses(
        (status = 200, description = "Tag page", body = TagPageResponse),
        (status = 400, description = "Invalid page number or tag encoding"),
        (status = 404, description = "No posts carry the tag"),
    ),
    params(
        ("tag" = String, Path, description = "Tag slug, percent-encoded"),
        ("page" = String, Path, description = "1-based page number"),
    ),
    tag = "Blog"
)]
pub async fn handle_tag_page(
    State(index): State<Arc<ContentIndex>>,
    State(config): State<Arc<AppConfig>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TagPageResponse>, ApiError> {
    let Path((tag, page)) = path?;
    // The router has already percent-decoded the segment.
    let tag = TagSlug::from_route(tag);
    let page = parse_page_number(&page)?;

    tracing::info!(tag = %tag, page = page, "Tag page request");

    let resolved = resolve_page(&tag, page, index.posts(), &config.blog)?;
    let metadata = PageMetadata::for_tag(&config.site, tag.as_str());

    Ok(Json(TagPageResponse {
        page: resolved,
        metadata,
    }))
}

/// Head metadata for a tag listing
#[utoipa::path(
    get,
    path = "/blog/tags/{tag}/metadata",
    responses(
        (status = 200, description = "Page metadata", body = PageMetadata),
        (status = 400, description = "Tag is not valid UTF-8"),
    ),
    params(
        ("tag" = String, Path, description = "Tag slug, percent-encoded"),
    ),
    tag = "Blog"
)]
pub async fn handle_tag_metadata(
    State(config): State<Arc<AppConfig>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PageMetadata>, ApiError> {
    let Path(tag) = path?;
    Ok(Json(PageMetadata::for_tag(&config.site, &tag)))
}

/// Number of published posts per tag
#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Tag counts keyed by tag slug", body = BTreeMap<String, usize>),
    ),
    tag = "Blog"
)]
pub async fn handle_tag_counts(
    State(index): State<Arc<ContentIndex>>,
) -> Json<BTreeMap<String, usize>> {
    Json(index.tag_counts().clone())
}

/// Route parameters for every tag and tag page
#[utoipa::path(
    get,
    path = "/api/tags/params",
    responses(
        (status = 200, description = "Static route parameters", body = TagParamsResponse),
    ),
    tag = "Blog"
)]
pub async fn handle_tag_params(
    State(index): State<Arc<ContentIndex>>,
    State(config): State<Arc<AppConfig>>,
) -> Json<TagParamsResponse> {
    Json(TagParamsResponse {
        tags: index.static_tag_params(),
        pages: index.static_page_params(config.blog.posts_per_page),
    })
}

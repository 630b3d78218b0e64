//! In-memory index of blog posts and tag counts.
//!
//! The index is built once at startup from `posts.yaml` and
//! `tag-data.json` and then shared read-only between requests.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use utoipa::ToSchema;

use crate::assets::{Asset, AssetLoader};
use crate::models::pagination::total_pages;
use crate::models::{CoreContent, Post, TagSlug};
use crate::services::slug::encode_route_segment;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read {asset}: {source}")]
    Read {
        asset: Asset,
        #[source]
        source: io::Error,
    },

    #[error("Invalid post index: {0}")]
    Posts(#[from] serde_yaml::Error),

    #[error("Invalid tag data: {0}")]
    TagData(#[from] serde_json::Error),
}

/// Route parameters for one tag listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TagParam {
    /// URI-encoded tag
    pub tag: String,
}

/// Route parameters for one page of a tag listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TagPageParam {
    /// URI-encoded tag
    pub tag: String,
    pub page: usize,
}

/// Posts sorted newest first, plus the tag-count table
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    posts: Vec<Post>,
    tag_counts: BTreeMap<String, usize>,
}

impl ContentIndex {
    /// Build an index from posts, computing tag counts from them.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        sort_posts(&mut posts);
        let tag_counts = count_tags(&posts);
        Self { posts, tag_counts }
    }

    /// Build an index with an externally maintained tag-count table.
    pub fn with_tag_counts(mut posts: Vec<Post>, tag_counts: BTreeMap<String, usize>) -> Self {
        sort_posts(&mut posts);
        Self { posts, tag_counts }
    }

    /// Load `posts.yaml` and, when present, `tag-data.json`.
    pub fn load(loader: &AssetLoader) -> Result<Self, ContentError> {
        let posts_yaml = loader
            .read(Asset::Posts)
            .map_err(|source| ContentError::Read {
                asset: Asset::Posts,
                source,
            })?;
        let posts: Vec<Post> = serde_yaml::from_str(&posts_yaml)?;

        let index = match loader.read(Asset::TagData) {
            Ok(json) => {
                let counts: BTreeMap<String, usize> = serde_json::from_str(&json)?;
                Self::with_tag_counts(posts, counts)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No tag data file, counting tags from posts");
                Self::from_posts(posts)
            }
            Err(source) => {
                return Err(ContentError::Read {
                    asset: Asset::TagData,
                    source,
                })
            }
        };

        tracing::info!(
            posts = index.posts.len(),
            tags = index.tag_counts.len(),
            "Loaded content index"
        );

        Ok(index)
    }

    /// All posts, newest first (drafts included).
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Tag slug → number of published posts.
    pub fn tag_counts(&self) -> &BTreeMap<String, usize> {
        &self.tag_counts
    }

    /// One entry per known tag, URI-encoded.
    pub fn static_tag_params(&self) -> Vec<TagParam> {
        self.tag_counts
            .keys()
            .map(|tag| TagParam {
                tag: encode_route_segment(tag),
            })
            .collect()
    }

    /// One entry per `(tag, page)` that has posts on it.
    pub fn static_page_params(&self, page_size: usize) -> Vec<TagPageParam> {
        self.tag_counts
            .iter()
            .flat_map(|(tag, &count)| {
                let encoded = encode_route_segment(tag);
                (1..=total_pages(count, page_size)).map(move |page| TagPageParam {
                    tag: encoded.clone(),
                    page,
                })
            })
            .collect()
    }
}

/// Newest first. Posts with equal dates keep their relative order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Listing view of `posts`; drafts are dropped unless `include_drafts`.
pub fn core_content<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    include_drafts: bool,
) -> Vec<CoreContent> {
    posts
        .into_iter()
        .filter(|post| include_drafts || !post.draft)
        .map(CoreContent::from)
        .collect()
}

/// Count slugified tags across published posts.
pub fn count_tags(posts: &[Post]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for post in posts.iter().filter(|p| !p.draft) {
        for tag in &post.tags {
            let slug = TagSlug::from_label(tag);
            *counts.entry(slug.as_str().to_string()).or_insert(0) += 1;
        }
    }
    counts
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A blog post as stored in the content index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// URL slug (`/blog/{slug}`)
    pub slug: String,

    pub title: String,

    /// Publication date, used for ordering
    pub date: NaiveDate,

    /// Last modification date
    #[serde(default)]
    pub lastmod: Option<NaiveDate>,

    /// Tags as written by the author (not slugified)
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub summary: Option<String>,

    /// Post body; dropped from listings
    #[serde(default)]
    pub body: String,
}

/// A post without its body, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CoreContent {
    pub slug: String,
    pub title: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<NaiveDate>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Site-relative link to the post
    pub path: String,
}

impl From<&Post> for CoreContent {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date,
            lastmod: post.lastmod,
            tags: post.tags.clone(),
            draft: post.draft,
            summary: post.summary.clone(),
            path: format!("blog/{}", post.slug),
        }
    }
}

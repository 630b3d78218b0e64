use serde::Serialize;
use utoipa::ToSchema;

use super::config::SiteConfig;

/// Page metadata consumed by the site's HTML head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// `<title>` text
    pub title: String,
    pub description: String,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

/// Canonical and alternate links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Alternates {
    pub canonical: String,
    /// `application/rss+xml` feed for this page
    pub rss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TwitterCard {
    pub title: String,
    pub card: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl PageMetadata {
    /// Build metadata for a generic page titled `title`.
    pub fn for_page(site: &SiteConfig, title: &str, description: &str, rss: String) -> Self {
        let images: Vec<String> = site.social_banner.iter().cloned().collect();
        Self {
            title: format!("{title} | {}", site.title),
            description: description.to_string(),
            alternates: Alternates {
                canonical: "./".to_string(),
                rss,
            },
            open_graph: OpenGraph {
                title: format!("{title} | {}", site.title),
                description: description.to_string(),
                url: "./".to_string(),
                site_name: site.title.clone(),
                locale: site.locale.clone(),
                kind: "website".to_string(),
                images: images.clone(),
            },
            twitter: TwitterCard {
                title: format!("{title} | {}", site.title),
                card: "summary_large_image".to_string(),
                images,
            },
        }
    }

    /// Metadata for the listing of posts tagged `tag` (already decoded).
    pub fn for_tag(site: &SiteConfig, tag: &str) -> Self {
        let description = format!("{} {tag} tagged content", site.title);
        let rss = format!("{}/tags/{tag}/feed.xml", site.site_url);
        Self::for_page(site, tag, &description, rss)
    }
}

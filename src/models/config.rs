use crate::assets::{Asset, AssetLoader};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Site-wide metadata used for page titles and links
    #[serde(default)]
    pub site: SiteConfig,

    /// Blog listing settings
    #[serde(default)]
    pub blog: BlogConfig,

    /// Grayscale demo settings
    #[serde(default)]
    pub gray: GrayConfig,
}

/// Site metadata
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Absolute base URL, without trailing slash
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// Image used for Open Graph / Twitter cards
    #[serde(default)]
    pub social_banner: Option<String>,
}

fn default_title() -> String {
    "Folio".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            site_url: default_site_url(),
            description: String::new(),
            locale: default_locale(),
            social_banner: None,
        }
    }
}

/// Blog listing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BlogConfig {
    /// Posts per tag page
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,

    /// Include posts marked as drafts in listings
    #[serde(default)]
    pub include_drafts: bool,
}

fn default_posts_per_page() -> usize {
    5
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            include_drafts: false,
        }
    }
}

/// Grayscale demo configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GrayConfig {
    /// Image fetched when the request does not name one
    #[serde(default)]
    pub default_image_url: Option<String>,

    /// Maximum download size in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Maximum decoded width or height in pixels
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Number of downloaded images kept in memory
    #[serde(default = "default_cache_entries")]
    pub cache_entries: usize,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_dimension() -> u32 {
    4096
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_cache_entries() -> usize {
    32
}

fn default_cache_ttl() -> u64 {
    600 // 10 minutes
}

fn default_user_agent() -> String {
    format!("folio-gray/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GrayConfig {
    fn default() -> Self {
        Self {
            default_image_url: None,
            max_image_bytes: default_max_image_bytes(),
            max_dimension: default_max_dimension(),
            fetch_timeout_secs: default_fetch_timeout(),
            cache_entries: default_cache_entries(),
            cache_ttl_secs: default_cache_ttl(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read(Asset::Config) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        site = %config.site.title,
                        posts_per_page = config.blog.posts_per_page,
                        "Loaded configuration"
                    );
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace values that would break pagination or URL building
    fn sanitized(mut self) -> Self {
        if self.blog.posts_per_page == 0 {
            tracing::warn!("posts_per_page must be positive, using default");
            self.blog.posts_per_page = default_posts_per_page();
        }
        while self.site.site_url.ends_with('/') {
            self.site.site_url.pop();
        }
        self
    }
}

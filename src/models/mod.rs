pub mod config;
pub mod metadata;
pub mod pagination;
pub mod post;
pub mod tag;

pub use config::{AppConfig, BlogConfig, GrayConfig, SiteConfig};
pub use metadata::PageMetadata;
pub use pagination::Pagination;
pub use post::{CoreContent, Post};
pub use tag::TagSlug;

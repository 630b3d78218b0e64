pub mod canvas;
pub mod content_index;
pub mod grayscale;
pub mod image_cache;
pub mod image_source;
pub mod slug;
pub mod tag_pages;

pub use canvas::Canvas;
pub use content_index::{ContentError, ContentIndex, TagPageParam, TagParam};
pub use grayscale::GrayscaleService;
pub use image_cache::ImageCache;
pub use image_source::{DecodeLimits, FileImageSource, HttpImageSource, ImageSource};
pub use tag_pages::{TagPage, TagPageError};

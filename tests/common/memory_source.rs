//! In-memory image source for driving the router without HTTP.

use async_trait::async_trait;
use pixel_filter::PixelBuffer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio::error::ImageError;
use folio::services::ImageSource;

/// Serves decoded images by URL and counts loads
#[derive(Default)]
pub struct MemoryImageSource {
    images: HashMap<String, PixelBuffer>,
    loads: AtomicUsize,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: &str, image: PixelBuffer) -> Self {
        self.images.insert(url.to_string(), image);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSource for MemoryImageSource {
    async fn decode_image(&self, url: &str) -> Result<PixelBuffer, ImageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| ImageError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

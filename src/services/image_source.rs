//! Image sources: fetch an image by URL and decode it to RGBA pixels.
//!
//! [`ImageSource`] is the seam between the grayscale pipeline and the
//! outside world. The HTTP implementation downloads without credentials
//! (no cookie store), caches the raw bytes, and decodes off the async
//! runtime. The file implementation serves the CLI and tests.

use async_trait::async_trait;
use image::ImageReader;
use pixel_filter::PixelBuffer;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ImageError;
use crate::models::GrayConfig;
use crate::services::image_cache::ImageCache;

/// Loads an image and yields its pixels
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch and decode the image at `url`.
    ///
    /// This is the only suspension point of the grayscale pipeline.
    async fn decode_image(&self, url: &str) -> Result<PixelBuffer, ImageError>;
}

/// Size limits applied before and during decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_bytes: usize,
    pub max_dimension: u32,
}

impl From<&GrayConfig> for DecodeLimits {
    fn from(config: &GrayConfig) -> Self {
        Self {
            max_bytes: config.max_image_bytes,
            max_dimension: config.max_dimension,
        }
    }
}

/// Decode PNG, JPEG or WebP bytes into an RGBA8 pixel buffer.
pub fn decode_bytes(bytes: &[u8], limits: DecodeLimits) -> Result<PixelBuffer, ImageError> {
    if bytes.len() > limits.max_bytes {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            max: limits.max_bytes,
        });
    }

    let reader = || {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::Decode(e.to_string()))
    };

    // Header-only pass so oversized images are rejected before allocation.
    let (width, height) = reader()?
        .into_dimensions()
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    if width > limits.max_dimension || height > limits.max_dimension {
        return Err(ImageError::UnsupportedDimensions {
            width,
            height,
            max: limits.max_dimension,
        });
    }

    let decoded = reader()?
        .decode()
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    PixelBuffer::new(width, height, rgba.into_raw())
        .map_err(|e| ImageError::Decode(e.to_string()))
}

async fn decode_blocking(
    bytes: Arc<[u8]>,
    limits: DecodeLimits,
) -> Result<PixelBuffer, ImageError> {
    tokio::task::spawn_blocking(move || decode_bytes(&bytes, limits))
        .await
        .map_err(|e| ImageError::Decode(format!("Decode task failed: {e}")))?
}

/// Downloads images over HTTP(S)
pub struct HttpImageSource {
    client: reqwest::Client,
    cache: ImageCache,
    limits: DecodeLimits,
}

impl HttpImageSource {
    pub fn new(config: &GrayConfig) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ImageError::Fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            cache: ImageCache::new(config.cache_entries, config.cache_ttl_secs),
            limits: DecodeLimits::from(config),
        })
    }

    /// Download raw bytes, consulting the cache first.
    async fn fetch(&self, url: &str) -> Result<Arc<[u8]>, ImageError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| ImageError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ImageError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        if let Some(bytes) = self.cache.get(url) {
            return Ok(bytes);
        }

        tracing::debug!(url = %url, "Fetching image");
        let mut response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > self.limits.max_bytes as u64 {
                return Err(ImageError::TooLarge {
                    size: length as usize,
                    max: self.limits.max_bytes,
                });
            }
        }

        // Content-Length may be absent (chunked) or wrong, so count as we go.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?
        {
            let size = body.len() + chunk.len();
            if size > self.limits.max_bytes {
                tracing::warn!(url = %url, max = self.limits.max_bytes, "Image body over limit");
                return Err(ImageError::TooLarge {
                    size,
                    max: self.limits.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::info!(url = %url, size_bytes = body.len(), "Image downloaded");

        let bytes: Arc<[u8]> = Arc::from(body);
        self.cache.store(url, bytes.clone());
        Ok(bytes)
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn decode_image(&self, url: &str) -> Result<PixelBuffer, ImageError> {
        let bytes = self.fetch(url).await?;
        decode_blocking(bytes, self.limits).await
    }
}

/// Reads images from a directory
///
/// `url` is a path relative to the root; a `file://` prefix is accepted.
/// Paths escaping the root are rejected.
pub struct FileImageSource {
    root: PathBuf,
    limits: DecodeLimits,
}

impl FileImageSource {
    pub fn new(root: impl Into<PathBuf>, limits: DecodeLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, ImageError> {
        let relative = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(ImageError::InvalidUrl(url.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn decode_image(&self, url: &str) -> Result<PixelBuffer, ImageError> {
        let path = self.resolve(url)?;
        tracing::debug!(path = %path.display(), "Reading image from file");

        let bytes = tokio::fs::read(&path).await?;
        decode_blocking(Arc::from(bytes), self.limits).await
    }
}

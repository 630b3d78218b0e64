//! Grayscale pipeline: load an image, desaturate a region, present it.
//!
//! The only await is the image load. Everything after it runs on the
//! blocking pool, and every call owns its own buffer and canvas.

use pixel_filter::{PixelBuffer, Rect};
use std::sync::Arc;

use crate::error::{FilterError, RenderError};
use crate::services::canvas::Canvas;
use crate::services::image_source::ImageSource;

pub struct GrayscaleService {
    source: Arc<dyn ImageSource>,
    default_url: Option<String>,
}

impl GrayscaleService {
    pub fn new(source: Arc<dyn ImageSource>, default_url: Option<String>) -> Self {
        Self {
            source,
            default_url,
        }
    }

    /// The URL to load: the requested one, else the configured default.
    pub fn resolve_url<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, FilterError> {
        requested
            .filter(|url| !url.trim().is_empty())
            .or(self.default_url.as_deref())
            .ok_or(FilterError::MissingUrl)
    }

    /// Load `url` and return a canvas the size of the image showing the
    /// grayscale version of `rect` at the origin.
    ///
    /// `rect` defaults to the whole image.
    pub async fn render(&self, url: &str, rect: Option<Rect>) -> Result<Canvas, FilterError> {
        let image = self.source.decode_image(url).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Image load failed");
            e
        })?;
        tracing::debug!(
            url = %url,
            width = image.width(),
            height = image.height(),
            "Image decoded"
        );

        tokio::task::spawn_blocking(move || filter_to_canvas(&image, rect))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    /// [`render`](Self::render) and encode the result as PNG.
    pub async fn render_png(&self, url: &str, rect: Option<Rect>) -> Result<Vec<u8>, FilterError> {
        let canvas = self.render(url, rect).await?;
        tokio::task::spawn_blocking(move || canvas.to_png())
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
            .map_err(FilterError::from)
    }
}

/// Synchronous part of the pipeline.
pub fn filter_to_canvas(image: &PixelBuffer, rect: Option<Rect>) -> Result<Canvas, FilterError> {
    let mut canvas = Canvas::new(image.width(), image.height())?;
    // Only the part that fits the canvas is ever presented.
    let rect = rect
        .unwrap_or_else(|| Rect::full(image.width(), image.height()))
        .cropped_to(canvas.width(), canvas.height());

    let mut region = image.region(rect).map_err(|e| {
        tracing::error!(?rect, error = %e, "Could not read back pixel data");
        FilterError::PixelDataUnavailable(e)
    })?;
    region.grayscale();
    canvas.present(&region);

    tracing::debug!(
        ?rect,
        canvas_width = canvas.width(),
        canvas_height = canvas.height(),
        "Grayscale region presented"
    );
    Ok(canvas)
}

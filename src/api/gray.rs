use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use pixel_filter::Rect;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::services::GrayscaleService;

/// Query parameters for the grayscale endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GrayQuery {
    /// Image to load; defaults to the configured demo image
    #[serde(default)]
    pub url: Option<String>,
    /// Region origin, may be negative
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    /// Region width; the region defaults to the whole image
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
}

impl GrayQuery {
    /// The requested region, or `None` for the whole image.
    ///
    /// A region needs both `w` and `h`; the origin defaults to `(0, 0)`.
    pub fn rect(&self) -> Result<Option<Rect>, ApiError> {
        match (self.w, self.h) {
            (Some(w), Some(h)) => Ok(Some(Rect::new(
                self.x.unwrap_or(0),
                self.y.unwrap_or(0),
                w,
                h,
            ))),
            (None, None) if self.x.is_none() && self.y.is_none() => Ok(None),
            _ => Err(ApiError::BadRequest(
                "A region needs both 'w' and 'h'".to_string(),
            )),
        }
    }
}

/// Grayscale an image
///
/// Loads the image without credentials, averages the RGB channels of the
/// requested region and returns a PNG the size of the source image with
/// the result drawn at the origin.
#[utoipa::path(
    get,
    path = "/projects/canvas/gray",
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 400, description = "Missing or invalid URL or region"),
        (status = 422, description = "Image could not be decoded or read back"),
        (status = 502, description = "Image could not be fetched"),
    ),
    params(GrayQuery),
    tag = "Canvas"
)]
pub async fn handle_gray(
    State(service): State<Arc<GrayscaleService>>,
    query: Result<Query<GrayQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let rect = query.rect()?;
    let url = service.resolve_url(query.url.as_deref())?;

    tracing::info!(url = %url, rect = ?rect, "Grayscale request received");

    let png_bytes = service.render_png(url, rect).await?;

    tracing::info!(size_bytes = png_bytes.len(), "Grayscale image rendered");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_defaults_to_whole_image() {
        assert_eq!(GrayQuery::default().rect().unwrap(), None);
    }

    #[test]
    fn test_rect_with_origin() {
        let query = GrayQuery {
            x: Some(-2),
            y: Some(3),
            w: Some(10),
            h: Some(4),
            ..GrayQuery::default()
        };
        assert_eq!(query.rect().unwrap(), Some(Rect::new(-2, 3, 10, 4)));
    }

    #[test]
    fn test_rect_origin_defaults_to_zero() {
        let query = GrayQuery {
            w: Some(1),
            h: Some(1),
            ..GrayQuery::default()
        };
        assert_eq!(query.rect().unwrap(), Some(Rect::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_rect_incomplete() {
        let query = GrayQuery {
            w: Some(1),
            ..GrayQuery::default()
        };
        assert!(matches!(query.rect(), Err(ApiError::BadRequest(_))));

        let query = GrayQuery {
            x: Some(1),
            ..GrayQuery::default()
        };
        assert!(matches!(query.rect(), Err(ApiError::BadRequest(_))));
    }
}

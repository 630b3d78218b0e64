use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixel_filter::PixelError;
use serde_json::json;
use thiserror::Error;

use crate::services::tag_pages::TagPageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TagPageError> for ApiError {
    fn from(e: TagPageError) -> Self {
        match e {
            TagPageError::NotFound(_) => ApiError::NotFound(e.to_string()),
            TagPageError::InvalidPage(_) | TagPageError::Slug(_) => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_client_error() {
            ApiError::BadRequest(rejection.body_text())
        } else {
            ApiError::Internal(rejection.body_text())
        }
    }
}

/// Errors while obtaining a decoded image
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch image: {0}")]
    Fetch(String),

    #[error("Image request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Unsupported dimensions: {width}x{height} (max {max})")]
    UnsupportedDimensions { width: u32, height: u32, max: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while presenting pixels
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate canvas: {0}")]
    CanvasAllocation(#[source] PixelError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

/// Errors from the grayscale pipeline
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("No image URL given and no default configured")]
    MissingUrl,

    #[error(transparent)]
    Image(#[from] ImageError),

    /// The requested region could not be read back from the image
    #[error("Pixel data unavailable: {0}")]
    PixelDataUnavailable(#[source] PixelError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl FilterError {
    fn status(&self) -> StatusCode {
        match self {
            FilterError::MissingUrl => StatusCode::BAD_REQUEST,
            FilterError::Image(e) => match e {
                ImageError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ImageError::Fetch(_) | ImageError::HttpStatus { .. } => StatusCode::BAD_GATEWAY,
                ImageError::TooLarge { .. }
                | ImageError::Decode(_)
                | ImageError::UnsupportedDimensions { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ImageError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    StatusCode::NOT_FOUND
                }
                ImageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            FilterError::PixelDataUnavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FilterError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Filter(e) => (e.status(), e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

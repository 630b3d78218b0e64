//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{Json, Response},
    routing::get,
    Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::{self, GrayQuery, TagPageResponse, TagParamsResponse};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, PageMetadata};
use crate::services::{ContentIndex, GrayscaleService, HttpImageSource, ImageSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub index: Arc<ContentIndex>,
    pub grayscale: Arc<GrayscaleService>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    let source = HttpImageSource::new(&config.gray)
        .map_err(|e| anyhow::anyhow!("Failed to create image source: {e}"))?;
    build_state(&asset_loader, config, Arc::new(source))
}

/// Like [`create_app_state`], but images come from `source`.
pub fn create_app_state_with_source(
    asset_loader: Arc<AssetLoader>,
    source: Arc<dyn ImageSource>,
) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    build_state(&asset_loader, config, source)
}

fn build_state(
    asset_loader: &AssetLoader,
    config: AppConfig,
    source: Arc<dyn ImageSource>,
) -> anyhow::Result<AppState> {
    let index = ContentIndex::load(asset_loader)
        .map_err(|e| anyhow::anyhow!("Failed to load content index: {e}"))?;
    let grayscale = GrayscaleService::new(source, config.gray.default_image_url.clone());

    Ok(AppState {
        config: Arc::new(config),
        index: Arc::new(index),
        grayscale: Arc::new(grayscale),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Blog tag listings
        .route("/blog/tags/:tag/page/:page", get(handle_tag_page))
        .route("/blog/tags/:tag/metadata", get(handle_tag_metadata))
        .route("/api/tags", get(handle_tag_counts))
        .route("/api/tags/params", get(handle_tag_params))
        // Canvas demo; output depends on a remote image, never cache it
        .route(
            "/projects/canvas/gray",
            get(handle_gray).layer(SetResponseHeaderLayer::overriding(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers.
// Extractor rejections are passed through so they answer with a JSON body.

async fn handle_tag_page(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TagPageResponse>, ApiError> {
    api::handle_tag_page(State(state.index), State(state.config), path).await
}

async fn handle_tag_metadata(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PageMetadata>, ApiError> {
    api::handle_tag_metadata(State(state.config), path).await
}

async fn handle_tag_counts(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    api::handle_tag_counts(State(state.index)).await
}

async fn handle_tag_params(State(state): State<AppState>) -> Json<TagParamsResponse> {
    api::handle_tag_params(State(state.index), State(state.config)).await
}

async fn handle_gray(
    State(state): State<AppState>,
    query: Result<Query<GrayQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    api::handle_gray(State(state.grayscale), query).await
}

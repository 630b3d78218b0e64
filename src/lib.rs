//! Folio - tag listings and a canvas grayscale demo
//!
//! Serves paginated, tag-filtered blog listings with their page metadata,
//! and a small image endpoint that desaturates a region of a remote image.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;

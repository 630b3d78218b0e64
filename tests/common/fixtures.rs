//! Test fixtures and constants.

/// Tags in the embedded content
pub mod tags {
    /// Seven published posts, one draft
    pub const JAVASCRIPT: &str = "javascript";

    /// Three published posts
    pub const CANVAS: &str = "canvas";

    /// Slug of "Next.js"
    pub const NEXTJS: &str = "nextjs";

    /// Non-ASCII tag, percent-encoded for use in a path
    pub const ESSAY_ENCODED: &str = "%E9%9A%8F%E7%AC%94";

    /// Only carried by a draft post
    pub const DRAFT_ONLY: &str = "shaders";

    /// No post carries this tag
    pub const UNKNOWN: &str = "haskell";
}

/// Published javascript posts, newest first
pub const JAVASCRIPT_POSTS: [&str; 7] = [
    "canvas-grayscale",
    "offscreen-canvas",
    "next-app-router-tags",
    "three-orbit-controls",
    "react-server-components",
    "rust-wasm-image",
    "debounce-vs-throttle",
];

/// The 2x1 reference image: opaque blue, then a transparent gray
pub const REFERENCE_RGBA: [u8; 8] = [0, 0, 255, 255, 90, 90, 90, 0];

/// The reference image after filtering
pub const REFERENCE_GRAY: [u8; 8] = [85, 85, 85, 255, 90, 90, 90, 0];

/// Encode RGBA pixels as a PNG
pub fn png_bytes(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    buf
}

/// Config without a default image, pointing nowhere
pub const CONFIG_NO_DEFAULT_IMAGE: &str = r#"
site:
  title: "Folio"
  site_url: "https://folio.example.com"
gray:
  fetch_timeout_secs: 5
"#;

/// Config with a small download limit
pub fn config_with_limits(max_image_bytes: usize, max_dimension: u32) -> String {
    format!(
        "gray:\n  max_image_bytes: {max_image_bytes}\n  max_dimension: {max_dimension}\n  fetch_timeout_secs: 5\n"
    )
}

use serde::Serialize;
use utoipa::ToSchema;

/// Pagination state for a tag listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page being shown
    pub current_page: usize,
    /// `ceil(filtered / page_size)`
    pub total_pages: usize,
    /// Slugified tag the listing is filtered by
    pub current_tag: String,
}

impl Pagination {
    pub fn new(current_page: usize, total_items: usize, page_size: usize, tag: &str) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_items, page_size),
            current_tag: tag.to_string(),
        }
    }
}

/// Number of pages needed for `total_items` at `page_size` per page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Index range of `page` (1-based), clipped to `total_items`.
///
/// Pages past the end give an empty range at `total_items`.
pub fn page_range(page: usize, page_size: usize, total_items: usize) -> std::ops::Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(total_items);
    let end = page.saturating_mul(page_size).min(total_items);
    start..end
}

pub mod gray;
pub mod tags;

pub use gray::{handle_gray, GrayQuery, __path_handle_gray};
pub use tags::{
    handle_tag_counts, handle_tag_metadata, handle_tag_page, handle_tag_params, TagPageResponse,
    TagParamsResponse,
};
pub use tags::{
    __path_handle_tag_counts, __path_handle_tag_metadata, __path_handle_tag_page,
    __path_handle_tag_params,
};

//! HTML to `PageReport` extraction. Pure: no network, no shared state.

pub mod general_extractor;
pub mod heading_extractor;
pub mod image_extractor;
pub mod page_extractor;
pub mod url_extractor;

pub use page_extractor::PageExtractor;

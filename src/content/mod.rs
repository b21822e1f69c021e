//! Content module - post models, CMS projections, and loading

mod detail;
mod listing;
pub mod loader;
mod post;

pub use detail::{count_words, project_detail, reading_time, DetailPage};
pub use listing::{project_listing, PostPagination, SUMMARY_FIELDS};
pub use loader::PostLoader;
pub use post::{
    Banner, ContentGroup, ContentSection, ImageField, PostDetail, PostFields, PostSummary,
    RichTextBlock, SummaryFields, TextFragment,
};

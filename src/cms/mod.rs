//! Headless CMS access (Prismic REST API v2)
//!
//! Only the two query shapes the blog needs are covered: predicate search
//! with field projection and paging, and lookup of a single document by UID.

mod client;
mod document;
mod error;
mod predicate;

pub use client::{CmsClient, QueryOptions};
pub use document::{ApiInfo, Document, Ref, SearchResponse};
pub use error::CmsError;
pub use predicate::{query_string, Predicate};

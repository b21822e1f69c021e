//! Listing pages: projection of search results and cursor-based appending

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::post::{PostSummary, SummaryFields};
use crate::cms::{Document, SearchResponse};
use crate::helpers::DateFormatter;

/// Fields requested from the CMS for each listed post
pub const SUMMARY_FIELDS: [&str; 3] = ["title", "subtitle", "author"];

/// Posts shown so far plus the cursor to the next page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPagination {
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

impl PostPagination {
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Append a following page after the current results.
    ///
    /// Posts already present are skipped, existing order is kept, and the
    /// cursor advances to the page's own cursor. Returns how many were added.
    pub fn append(&mut self, page: PostPagination) -> usize {
        let mut seen: HashSet<String> = self.results.iter().map(|p| p.uid.clone()).collect();
        let before = self.results.len();

        for post in page.results {
            if seen.insert(post.uid.clone()) {
                self.results.push(post);
            } else {
                tracing::debug!("Skipping duplicate post {}", post.uid);
            }
        }

        self.next_page = page.next_page;
        self.results.len() - before
    }
}

/// Normalize one page of search results.
///
/// At most `page_size` summaries are kept. Documents without a UID cannot
/// be linked and are dropped.
pub fn project_listing(
    response: SearchResponse<SummaryFields>,
    page_size: usize,
    formatter: &DateFormatter,
) -> Result<PostPagination> {
    let total = response.results.len();
    if total > page_size {
        tracing::warn!(
            "CMS returned {} results for a page of {}, truncating",
            total,
            page_size
        );
    }

    let mut results = Vec::with_capacity(total.min(page_size));
    for document in response.results.into_iter().take(page_size) {
        if let Some(summary) = project_summary(document, formatter)? {
            results.push(summary);
        }
    }

    Ok(PostPagination {
        next_page: response.next_page,
        results,
    })
}

fn project_summary(
    document: Document<SummaryFields>,
    formatter: &DateFormatter,
) -> Result<Option<PostSummary>> {
    let Some(uid) = document.uid else {
        tracing::warn!("Skipping document {} without uid", document.id);
        return Ok(None);
    };

    let first_publication_date = document
        .first_publication_date
        .as_deref()
        .map(|date| formatter.format(date))
        .transpose()?;

    Ok(Some(PostSummary {
        uid,
        first_publication_date,
        title: document.data.title.unwrap_or_default(),
        subtitle: document.data.subtitle.filter(|s| !s.is_empty()),
        author: document.data.author.unwrap_or_default(),
    }))
}

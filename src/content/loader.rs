//! Content loader - loads posts from the CMS

use anyhow::{Context, Result};
use std::collections::HashSet;

use super::detail::project_detail;
use super::listing::{project_listing, PostPagination, SUMMARY_FIELDS};
use super::post::{PostDetail, PostFields, PostSummary, SummaryFields};
use crate::cms::{CmsClient, Predicate, QueryOptions};
use crate::helpers::DateFormatter;
use crate::Blog;

/// Loads and normalizes posts from the CMS
#[derive(Debug, Clone)]
pub struct PostLoader {
    client: CmsClient,
    formatter: DateFormatter,
    document_type: String,
    page_size: usize,
}

impl PostLoader {
    /// Create a loader from the site configuration
    pub fn new(blog: &Blog) -> Result<Self> {
        let client = CmsClient::new(&blog.config.cms).context("Failed to create CMS client")?;
        let formatter = DateFormatter::from_config(&blog.config)?;
        Ok(Self::with_parts(
            client,
            formatter,
            &blog.config.cms.document_type,
            blog.config.per_page,
        ))
    }

    pub fn with_parts(
        client: CmsClient,
        formatter: DateFormatter,
        document_type: &str,
        page_size: usize,
    ) -> Self {
        Self {
            client,
            formatter,
            document_type: document_type.to_string(),
            page_size: page_size.max(1),
        }
    }

    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    /// Load the first listing page
    pub async fn load_listing(&self) -> Result<PostPagination> {
        let predicates = [Predicate::at("document.type", self.document_type.as_str())];
        let options = QueryOptions {
            fetch: SUMMARY_FIELDS
                .iter()
                .map(|field| format!("{}.{}", self.document_type, field))
                .collect(),
            page_size: Some(self.page_size),
            ..Default::default()
        };

        let response = self
            .client
            .query::<SummaryFields>(&predicates, &options)
            .await?;
        let listing = project_listing(response, self.page_size, &self.formatter)?;
        tracing::debug!(
            "Loaded {} posts (more: {})",
            listing.results.len(),
            listing.has_more()
        );
        Ok(listing)
    }

    /// Load the page a cursor points at
    pub async fn load_page(&self, cursor: &str) -> Result<PostPagination> {
        let response = self.client.fetch_page::<SummaryFields>(cursor).await?;
        project_listing(response, self.page_size, &self.formatter)
    }

    /// Fetch the next page and append it to `listing`.
    ///
    /// Failures are logged and leave `listing` untouched. Returns the
    /// number of posts added.
    pub async fn load_more(&self, listing: &mut PostPagination) -> usize {
        let Some(cursor) = listing.next_page.clone() else {
            return 0;
        };

        match self.load_page(&cursor).await {
            Ok(page) => listing.append(page),
            Err(e) => {
                tracing::warn!("Failed to load more posts: {:#}", e);
                0
            }
        }
    }

    /// Follow every cursor and return all post summaries
    pub async fn load_all(&self) -> Result<Vec<PostSummary>> {
        let mut listing = self.load_listing().await?;
        let mut visited: HashSet<String> = HashSet::new();

        while let Some(cursor) = listing.next_page.clone() {
            if !visited.insert(cursor.clone()) {
                tracing::warn!("Cursor {} was already visited, stopping", cursor);
                break;
            }
            let page = self
                .load_page(&cursor)
                .await
                .with_context(|| format!("Failed to follow cursor {}", cursor))?;
            listing.append(page);
        }
        Ok(listing.results)
    }

    /// Load a single post by UID
    pub async fn load_post(&self, uid: &str) -> Result<PostDetail> {
        let document = self
            .client
            .get_by_uid::<PostFields>(&self.document_type, uid)
            .await?;
        project_detail(document, &self.formatter)
    }
}

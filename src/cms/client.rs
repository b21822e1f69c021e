//! HTTP client for the CMS REST API

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::document::{ApiInfo, Document, SearchResponse};
use super::error::CmsError;
use super::predicate::{query_string, Predicate};
use crate::config::CmsConfig;

/// Options for a predicate search
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Field projection, e.g. `post.title`
    pub fetch: Vec<String>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
    /// Raw orderings expression, e.g. `[document.first_publication_date desc]`
    pub orderings: Option<String>,
}

/// Client handle; cheap to clone
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    endpoint: Url,
    search_url: Url,
    access_token: Option<String>,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let raw = config.endpoint.trim();
        if raw.is_empty() {
            return Err(CmsError::MissingEndpoint);
        }
        let endpoint = Url::parse(raw.trim_end_matches('/'))?;
        let search_url = Url::parse(&format!(
            "{}/documents/search",
            endpoint.as_str().trim_end_matches('/')
        ))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("cms-blog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            search_url,
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve the ref of the currently published content
    pub async fn master_ref(&self) -> Result<String, CmsError> {
        let mut url = self.endpoint.clone();
        self.authorize(&mut url);
        let info: ApiInfo = self.get_json(url).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(CmsError::NoMasterRef)
    }

    /// Run a predicate search against the master ref
    pub async fn query<T: DeserializeOwned>(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<SearchResponse<T>, CmsError> {
        let reference = self.master_ref().await?;

        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", &reference);
            if !predicates.is_empty() {
                pairs.append_pair("q", &query_string(predicates));
            }
            if !options.fetch.is_empty() {
                pairs.append_pair("fetch", &options.fetch.join(","));
            }
            if let Some(size) = options.page_size {
                pairs.append_pair("pageSize", &size.to_string());
            }
            if let Some(page) = options.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(orderings) = &options.orderings {
                pairs.append_pair("orderings", orderings);
            }
        }
        self.authorize(&mut url);

        let response = self.get_json(url).await?;
        Ok(redact_cursors(response))
    }

    /// Fetch a single document of `doc_type` by its UID
    pub async fn get_by_uid<T: DeserializeOwned>(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> Result<Document<T>, CmsError> {
        let predicates = [Predicate::at(format!("my.{}.uid", doc_type), uid)];
        let options = QueryOptions {
            page_size: Some(1),
            ..Default::default()
        };
        let response = self.query::<T>(&predicates, &options).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }

    /// Follow a `next_page` cursor as returned by a previous search
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        cursor: &str,
    ) -> Result<SearchResponse<T>, CmsError> {
        let mut url = strip_access_token(&self.check_cursor(cursor)?);
        self.authorize(&mut url);
        let response = self.get_json(url).await?;
        Ok(redact_cursors(response))
    }

    /// Only cursors on the configured CMS origin are followed
    pub fn check_cursor(&self, cursor: &str) -> Result<Url, CmsError> {
        let url =
            Url::parse(cursor).map_err(|_| CmsError::ForeignCursor(cursor.to_string()))?;
        if url.origin() != self.endpoint.origin() {
            return Err(CmsError::ForeignCursor(cursor.to_string()));
        }
        Ok(url)
    }

    fn authorize(&self, url: &mut Url) {
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, CmsError> {
        // Query string may carry the access token
        let shown = format!("{}{}", url.origin().ascii_serialization(), url.path());
        debug!(url = %shown, "CMS request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: shown,
            });
        }
        Ok(response.json::<R>().await?)
    }
}

/// Cursors leave the server, so they never carry the access token
fn redact_cursors<T>(mut response: SearchResponse<T>) -> SearchResponse<T> {
    response.next_page = response.next_page.as_deref().map(redact_cursor);
    response.prev_page = response.prev_page.as_deref().map(redact_cursor);
    response
}

fn redact_cursor(cursor: &str) -> String {
    match Url::parse(cursor) {
        Ok(url) if url.query_pairs().any(|(key, _)| key == "access_token") => {
            strip_access_token(&url).into()
        }
        _ => cursor.to_string(),
    }
}

fn strip_access_token(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "access_token")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    stripped.set_query(None);
    if !pairs.is_empty() {
        stripped.query_pairs_mut().extend_pairs(pairs);
    }
    stripped
}

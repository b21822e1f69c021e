use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS endpoint is not configured")]
    MissingEndpoint,
    #[error("invalid CMS url: {0}")]
    Url(#[from] url::ParseError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("CMS responded with {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("CMS did not advertise a master ref")]
    NoMasterRef,
    #[error("no {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },
    #[error("cursor does not point at the configured CMS: {0}")]
    ForeignCursor(String),
}

impl CmsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CmsError::NotFound { .. })
    }
}

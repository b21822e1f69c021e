use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cms::CmsError;

/// Errors of the JSON endpoints.
///
/// The Display output is logged, not sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing page cursor")]
    MissingCursor,
    #[error("cms error: {0}")]
    Cms(CmsError),
    #[error("internal error: {0:#}")]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<CmsError>() {
            Ok(cms) => ApiError::Cms(cms),
            Err(other) => ApiError::Other(other),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCursor | ApiError::Cms(CmsError::ForeignCursor(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Cms(CmsError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Cms(_) => StatusCode::BAD_GATEWAY,
            ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingCursor => "missing_cursor",
            ApiError::Cms(CmsError::ForeignCursor(_)) => "invalid_cursor",
            ApiError::Cms(CmsError::NotFound { .. }) => "not_found",
            ApiError::Cms(_) => "cms_unavailable",
            ApiError::Other(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                errors: vec![self.public_message().to_string()],
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingCursor.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Cms(CmsError::ForeignCursor("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Cms(CmsError::NoMasterRef).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Other(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_anyhow_keeps_cms_error() {
        let err: ApiError = anyhow::Error::from(CmsError::MissingEndpoint).into();
        assert!(matches!(err, ApiError::Cms(CmsError::MissingEndpoint)));

        let err: ApiError = anyhow::anyhow!("template failed").into();
        assert!(matches!(err, ApiError::Other(_)));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Everything that can go wrong between a request (or an ingestion run) and the store
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field} time format")]
    InvalidTimeFormat { field: &'static str },

    #[error("Start time cannot be after end time")]
    InvalidRange,

    #[error("Invalid {0} ID")]
    InvalidId(&'static str),

    #[error("Invalid JSON in request body")]
    InvalidBody,

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CatalogError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::MissingField(_)
            | CatalogError::InvalidTimeFormat { .. }
            | CatalogError::InvalidRange
            | CatalogError::InvalidId(_)
            | CatalogError::InvalidBody => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Upstream(format!("malformed provider payload: {}", err))
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Store internals stay in the logs
            CatalogError::Storage(err) => {
                tracing::error!("storage failure: {}", err);
                "Database error".to_string()
            }
            CatalogError::NotFound { entity, .. } => format!("{} not found", entity),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        assert_eq!(
            CatalogError::MissingField("start").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::InvalidTimeFormat { field: "end" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CatalogError::InvalidRange.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CatalogError::InvalidId("team").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            CatalogError::MissingField("start").to_string(),
            "Missing required field: start"
        );
        assert_eq!(
            CatalogError::InvalidTimeFormat { field: "end" }.to_string(),
            "Invalid end time format"
        );
        assert_eq!(
            CatalogError::not_found("Team", 42).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}

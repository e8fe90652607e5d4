use axum::{
    extract::rejection::BytesRejection,
    response::{IntoResponse, Response},
    Json,
};
use feedback_store::StoreError;
use feedback_types::ConfigError;
use http::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const MISSING_CONFIG_MESSAGE: &str = "Store credentials missing";
pub const INVALID_SUBMISSION_MESSAGE: &str = "Invalid submission";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing configuration: {0}")]
    MissingStoreConfig(#[from] ConfigError),
    #[error("Store error: {0}")]
    Store(StoreError),
    #[error("Invalid submission: {0}")]
    Validation(#[from] garde::Report),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<BytesRejection> for ApiError {
    fn from(err: BytesRejection) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("Cannot read request body"))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingConfig(e) => ApiError::MissingStoreConfig(e),
            other => ApiError::Store(other),
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingStoreConfig(e) => {
                error!("Cannot store feedback: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(MISSING_CONFIG_MESSAGE),
                )
            }
            ApiError::Store(e) => {
                error!("Store error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(e.to_string()))
            }
            ApiError::Validation(report) => {
                debug!("Rejected submission: {report}");
                let details = report
                    .iter()
                    .map(|(path, e)| FieldError {
                        path: path.to_string(),
                        message: e.message().to_string(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody {
                        error: INVALID_SUBMISSION_MESSAGE.to_string(),
                        details,
                    },
                )
            }
            ApiError::MalformedBody(e) => {
                error!("Server error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(INTERNAL_ERROR_MESSAGE),
                )
            }
            ApiError::Internal(e) => {
                error!("Server error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(INTERNAL_ERROR_MESSAGE),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

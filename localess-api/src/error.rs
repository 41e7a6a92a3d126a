use axum::extract::rejection::QueryRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use localess_common::{log_by_severity, ErrorSeverity, Severity};
use localess_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Carries the cache header the response is sent with.
    #[error("Space not found")]
    SpaceNotFound { cache_control: String },

    #[error("File not found, Publish first.")]
    FileNotFound,

    #[error("Not found")]
    RouteNotFound,

    /// Malformed query string.
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("internal error: {0}")]
    Store(#[from] StoreError),
}

/// JSON body of an error response, shaped like a Firebase `HttpsError`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SpaceNotFound { .. } | ApiError::FileNotFound | ApiError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Store(_) => ErrorBody {
                status: "INTERNAL",
                message: "Internal error".to_string(),
            },
            ApiError::InvalidArgument { message } => ErrorBody {
                status: "INVALID_ARGUMENT",
                message: message.clone(),
            },
            _ => ErrorBody {
                status: "NOT_FOUND",
                message: self.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidArgument {
            message: rejection.body_text(),
        }
    }
}

impl Severity for ApiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::Store(e) => e.severity(),
            _ => ErrorSeverity::Warning,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_by_severity("request failed", &self);
        let mut response = (self.status_code(), Json(self.body())).into_response();
        if let ApiError::SpaceNotFound { cache_control } = &self {
            if let Ok(value) = HeaderValue::from_str(cache_control) {
                response.headers_mut().insert(header::CACHE_CONTROL, value);
            }
        }
        response
    }
}

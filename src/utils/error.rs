use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::fmt;

/// Everything a handler can fail with. Each variant maps to exactly one HTTP
/// status and is converted to a plain-text response at the handler boundary,
/// nothing propagates past it.
#[derive(Debug)]
pub enum ApiError {
    MalformedRequest(String),
    InvalidIdentifier(String),
    NotFound(String),
    Storage(String),
    Serialization(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MalformedRequest(msg) => write!(f, "Malformed request: {}", msg),
            ApiError::InvalidIdentifier(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Storage(msg) => write!(f, "Database error: {}", msg),
            ApiError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

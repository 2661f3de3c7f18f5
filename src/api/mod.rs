pub mod health;
pub mod swagger;
pub mod users;

use crate::utils::error::ApiError;
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;

/// Writes a pretty-printed JSON body with Content-Type and an exact
/// Content-Length derived from the serialized bytes.
pub(crate) fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_vec_pretty(value) {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(body),
        Err(e) => ApiError::Serialization(e.to_string()).into_response(),
    }
}

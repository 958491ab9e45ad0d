use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;

pub const RESOURCE_NOT_FOUND_MESSAGE: &str = "The requested resource was not found on this server.";

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Failed to fetch mining pools.")]
    PoolsUnavailable,

    #[display(fmt = "Not found: {}", _0)]
    NotFound(String),

    #[display(fmt = "Missing data: {}", _0)]
    MissingData(String),

    #[display(fmt = "Internal server error: {}", _0)]
    InternalError(String),
}

impl ApiError {
    pub fn pool_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Mining pool with id \"{}\" does not exist.", id))
    }

    pub fn details_missing(id: &str) -> Self {
        ApiError::MissingData(format!("Details not defined for pool \"{}\"", id))
    }

    pub fn resource_not_found() -> Self {
        ApiError::NotFound(RESOURCE_NOT_FOUND_MESSAGE.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PoolsUnavailable | ApiError::MissingData(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::PoolsUnavailable => HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch mining pools."
            })),
            ApiError::NotFound(ref message) => HttpResponse::NotFound().json(json!({
                "error": "Not Found",
                "message": message
            })),
            ApiError::MissingData(ref message) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": "Missing data",
                    "message": message
                }))
            }
            ApiError::InternalError(ref message) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error",
                    "message": message
                }))
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// ENUMS
//--------------------------------------------------------------------------------------------------
// | Name       | Description                     |
// |------------|---------------------------------|
// | ApiError   | Error types for the HTTP layer  |
//--------------------------------------------------------------------------------------------------

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::core::MultiBookError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<MultiBookError> for ApiError {
    fn from(err: MultiBookError) -> Self {
        match err {
            MultiBookError::UnknownSymbol(symbol) => Self::BadRequest(format!("unknown symbol: {symbol}")),
            MultiBookError::Book(book_err) => Self::BadRequest(book_err.to_string()),
        }
    }
}

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use crate::db::StoreError;

#[derive(Debug)]
pub enum PageError {
    NotFound(String),

    Validation(String),

    Internal(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PageError::Validation(msg) => write!(f, "Validation error: {}", msg),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => PageError::NotFound(err.to_string()),
            StoreError::Persistence { ref source, .. } => {
                PageError::Internal(format!("{err}: {source}"))
            }
        }
    }
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        PageError::Internal(format!("template rendering failed: {err}"))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            PageError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PageError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{message}</p>\
             <p><a href=\"/\">Back to the blog</a></p></body></html>",
        );

        (status, Html(body)).into_response()
    }
}

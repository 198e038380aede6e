use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::utils::{detail_response, error_fmt_chain};

// Errors every handler can end in, validation errors are rendered by
// `crate::validation` before a handler runs
#[derive(Error)]
pub enum ApiError{
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Email already registered")]
    EmailNotUnique(#[source] anyhow::Error),
    #[error("Internal Server Error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::EmailNotUnique(_) => StatusCode::CONFLICT,
            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    // The cause chain only goes to the logs
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        detail_response(self.status_code(), &self.to_string())
    }
}

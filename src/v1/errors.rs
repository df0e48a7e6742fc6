/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate Limit Exceeded. X-Rate-Limit-Remaining: {0}")]
    RateLimitExceeded(String),

    #[error("Not Found")]
    ResourceDoesNotExist(),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Encountered an error: status code {0}, msg: {1}")]
    Status(u16, String),

    #[error("Object has no requester attached")]
    RequesterNotFound(),

    #[error("The root key `{0}` was not found in the response")]
    RootKeyMissing(String),

    #[error("API Response is malformed: {0}")]
    ApiResponseMalformed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CanvasError {
    /// True for errors that came from a non-success HTTP status.
    pub fn is_http_status(&self) -> bool {
        matches!(
            self,
            CanvasError::BadRequest(_)
                | CanvasError::InvalidAccessToken(_)
                | CanvasError::Unauthorized(_)
                | CanvasError::Forbidden(_)
                | CanvasError::RateLimitExceeded(_)
                | CanvasError::ResourceDoesNotExist()
                | CanvasError::Conflict(_)
                | CanvasError::UnprocessableEntity(_)
                | CanvasError::Status(_, _)
        )
    }
}

//! Failures of the per-connection pipeline.
//!
//! Every variant maps to exactly one status code, so the connection handler
//! never has to guess which response an error deserves.

use std::path::PathBuf;

use crate::http::parser::ParseError;
use crate::http::request::Method;
use crate::http::response::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("malformed request line: {0}")]
    Malformed(#[from] ParseError),

    #[error("unknown host {0:?}")]
    UnknownHost(Option<String>),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("timed out waiting for the request head")]
    ReadTimeout,

    #[error("no such resource: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    /// The status code reported to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::Malformed(_)
            | RequestError::UnknownHost(_)
            | RequestError::HeadTooLarge(_)
            | RequestError::ReadTimeout => StatusCode::BadRequest,
            RequestError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
            RequestError::NotFound(_) => StatusCode::NotFound,
            RequestError::Io(_) => StatusCode::InternalServerError,
        }
    }
}

use std::io;

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Errors raised while framing and parsing a request.
///
/// Every variant maps to the status code the connection answers with before
/// shutting the request cycle down, see [`ParseError::status`].
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header block too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("request too large, declared: {declared_size} exceed the limit {max_size}")]
    TooLargePayload { declared_size: u64, max_size: usize },

    #[error("invalid request line: {line:?}")]
    InvalidRequestLine { line: String },

    #[error("unsupported protocol version: {token:?}")]
    UnsupportedVersion { token: String },

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_large_payload(declared_size: u64, max_size: usize) -> Self {
        Self::TooLargePayload { declared_size, max_size }
    }

    pub fn invalid_request_line<S: ToString>(line: S) -> Self {
        Self::InvalidRequestLine { line: line.to_string() }
    }

    pub fn unsupported_version<S: ToString>(token: S) -> Self {
        Self::UnsupportedVersion { token: token.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    /// The status code the connection answers with for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TooLargeHeader { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            Self::TooLargePayload { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedVersion { .. } => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequestLine { .. }
            | Self::InvalidMethod
            | Self::InvalidUri
            | Self::InvalidHeader { .. }
            | Self::InvalidContentLength { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// True for the limit violations that also terminate the write side of
    /// the connection after the error response is flushed.
    pub fn is_size_violation(&self) -> bool {
        matches!(self, Self::TooLargeHeader { .. } | Self::TooLargePayload { .. })
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

use crate::http::{Method, StatusCode, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication rejected by the storage service: HTTP Status Code = {status}")]
    AuthFailure { status: StatusCode },
    #[error("Task lifecycle violation: {0}")]
    StateViolation(String),
    #[error("Malformed byte range response framing: {0}")]
    DecodeError(String),
    #[error("Unexpected response for {method} {uri}: HTTP Status Code = {status}")]
    ProtocolMismatch {
        method: Method,
        uri: Box<str>,
        status: StatusCode,
    },
    #[error("Failed to parse container listing: {0}")]
    ListingParse(#[from] serde_json::Error),
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, Error>;

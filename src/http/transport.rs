use super::{Request, Response};
use std::{io::Error as IOError, result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to do local io operation during the exchange: {0}")]
    IOError(#[from] IOError),
    #[error("Connection failure: {0}")]
    ConnectionError(Box<str>),
}

pub type TransportResult = result::Result<Response, TransportError>;

pub trait Transport {
    fn call(&self, request: &Request) -> TransportResult;
}

pub struct PanickedTransport(pub(crate) &'static str);

impl Transport for PanickedTransport {
    fn call(&self, _request: &Request) -> TransportResult {
        panic!("{}", self.0);
    }
}

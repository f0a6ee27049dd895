//! Error types shared by the library.
//!
//! `Auth`, `Api` and `Data` are the failures callers are expected to match on.
//! The remaining variants wrap lower-level failures from the HTTP stack, the
//! file system and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Authorization failed or no usable token is available.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A resource endpoint answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A successful response did not have the expected shape.
    #[error("Malformed response: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        Error::Data(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use std::{fmt, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SMS permission not granted")]
    PermissionDenied,

    #[error("Failed to read SMS: {0}")]
    QueryFailed(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn config<T: fmt::Display>(inner: T) -> Self {
        Self::Config(inner.to_string())
    }

    pub fn query<T: fmt::Display>(inner: T) -> Self {
        Self::QueryFailed(inner.to_string())
    }

    /// Stable code handed to the host layer alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Error::PermissionDenied => "PERMISSION_DENIED",
            Error::QueryFailed(_) => "QUERY_FAILED",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::QueryFailed(value.to_string())
    }
}

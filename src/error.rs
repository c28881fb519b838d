use std::{io, path::PathBuf};

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    #[error("operation `{operation}` has no parameter `{param}`")]
    UnknownParam {
        operation: &'static str,
        param: String,
    },
    #[error("operation `{operation}` requires parameter `{param}`")]
    MissingParam {
        operation: &'static str,
        param: &'static str,
    },
    #[error("notification channel closed")]
    ChannelClosed,
    #[error(transparent)]
    File(#[from] FileAccessError),
}

/// Failure of a single request round-trip.
///
/// Requests are never retried, so the caller sees exactly one of these per failed call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with non-200 status {0}")]
    Status(StatusCode),
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FileAccessError {
    #[error("file `{}` does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("`{}` is a directory, not a file", .0.display())]
    IsDirectory(PathBuf),
    #[error("no file name or file data supplied")]
    Missing,
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

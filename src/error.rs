use std::{io, path::PathBuf};

use arrow::error::ArrowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A page, page size, index or query parameter outside of its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The data file couldn't be opened or read.
    #[error("Unable to read '{path}': {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The data file isn't valid delimited text.
    #[error("Malformed dataset '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

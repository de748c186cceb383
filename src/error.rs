//! Domain error types.
//!
//! Both kinds are recoverable: a [`ValidationError`] aborts a submission before
//! anything leaves the machine, a [`RequestError`] ends an upload that was
//! already in flight.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The file is too large. Please select a file smaller than {max_mb}MB.")]
    FileTooLarge { size: u64, max_mb: u64 },
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Cannot read upload file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed result body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unsupported form method '{0}'")]
    Method(String),
}

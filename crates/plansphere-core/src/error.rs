//! Error types for PlanSphere

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The remote call could not be completed, or returned no text at all.
    #[error("AI request failed: {0}")]
    Request(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The round trip succeeded but the response text violates its schema contract.
    #[error("AI response invalid: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// True when the failure happened before any response text was available.
    ///
    /// Distinguishes a RequestFailure (transport) from a ParseFailure
    /// (contract violation after a successful round trip).
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Error::Request(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

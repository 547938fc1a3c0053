//! Error types for index discovery and metadata extraction.

use thiserror::Error;

/// Errors raised by an [`IndexClient`](crate::client::IndexClient) implementation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The client could not be built from the supplied configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Transport-level failure talking to the cluster.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cluster answered with a non-success status.
    #[error("Cluster returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Errors surfaced by an extractor to the pipeline driving it.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// `extract` was called before `init`.
    #[error("Extractor used before init")]
    Uninitialized,

    /// An index definition did not have the structure the cluster contract promises.
    #[error("Malformed index '{index}': {reason}")]
    MalformedIndex { index: String, reason: String },
}

impl ExtractorError {
    pub fn malformed(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIndex {
            index: index.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = ExtractorError::malformed("orders", "mappings is not an object");
        assert_eq!(err.to_string(), "Malformed index 'orders': mappings is not an object");
    }

    #[test]
    fn test_status_message() {
        let err = ClientError::Status { status: 403, body: "forbidden".to_string() };
        assert_eq!(err.to_string(), "Cluster returned status 403: forbidden");
    }
}

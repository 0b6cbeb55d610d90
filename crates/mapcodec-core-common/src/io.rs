//! Retrieval seam for transport artifacts.
//!
//! The decoder never knows where an artifact lives. Implementations of
//! [`ArtifactSource`] hand it the raw artifact bytes, and any failure to do so
//! is reported as a [`RetrievalError`].

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised while retrieving an artifact.
///
/// Retrieval is never retried internally; the caller decides what to do.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The artifact does not exist at the given location
    #[error("Artifact not found at '{location}'")]
    NotFound {
        /// Where the artifact was expected
        location: String,
    },

    /// Local read failed for a reason other than absence
    #[error("Failed to read artifact '{location}': {source}")]
    Io {
        /// The artifact location
        location: String,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The request could not be completed (DNS, connect, TLS, body read)
    #[error("Network error fetching '{location}': {message}")]
    Network {
        /// The artifact URL
        location: String,
        /// Description of the transport failure
        message: String,
    },

    /// The request did not complete before the timeout elapsed
    #[error("Timed out after {timeout_secs}s fetching '{location}'")]
    Timeout {
        /// The artifact URL
        location: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// The server answered with a non-success status
    #[error("Fetching '{location}' returned HTTP {status}")]
    Status {
        /// The artifact URL
        location: String,
        /// HTTP status code
        status: u16,
    },

    /// The location string could not be interpreted
    #[error("Invalid artifact location '{location}': {reason}")]
    InvalidLocation {
        /// The rejected location
        location: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Source of transport artifact bytes.
///
/// Implementations fetch the whole artifact in one call. Nothing is cached
/// between calls and no state is shared between invocations.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Human-readable location of the artifact (path or URL), used in logs
    /// and error messages.
    fn location(&self) -> &str;

    /// Retrieves the complete artifact.
    ///
    /// # Errors
    ///
    /// Returns a [`RetrievalError`] if the artifact cannot be read in full.
    async fn fetch(&self) -> Result<Bytes, RetrievalError>;
}

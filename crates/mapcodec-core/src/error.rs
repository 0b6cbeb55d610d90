//! Custom error types for `MapCodec` operations.
//!
//! Every failure in the encoder or decoder surfaces as a [`MapCodecError`]
//! whose variant names the stage that failed and whose source chain keeps the
//! underlying cause. All of them are terminal for the current invocation.

use std::path::PathBuf;
use thiserror::Error;

pub use mapcodec_core_common::RetrievalError;

/// Main error type for `MapCodec` operations.
///
/// This is the root error type that encompasses all stage-specific errors.
/// It uses `#[error(transparent)]` to delegate display formatting to the
/// underlying error variants.
#[derive(Debug, Error)]
pub enum MapCodecError {
    /// I/O errors (source unreadable, destination unwritable)
    #[error(transparent)]
    Io(#[from] IoError),

    /// Input was not well-formed JSON
    #[error(transparent)]
    Format(#[from] FormatError),

    /// LZ4 compression failed
    #[error(transparent)]
    Compression(#[from] CompressionError),

    /// The artifact could not be fetched
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// The artifact could not be turned back into a dataset
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// I/O related errors.
///
/// These errors occur while reading the source dataset or writing an
/// artifact to disk.
#[derive(Debug, Error)]
pub enum IoError {
    /// Failed to read from a file
    #[error("Failed to read {format} file '{path}': {source}")]
    Read {
        /// What was being read (e.g., "source JSON")
        format: String,
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write to a file
    #[error("Failed to write {format} file '{path}': {source}")]
    Write {
        /// What was being written (e.g., "artifact")
        format: String,
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Path is invalid
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path
        path: PathBuf,
        /// Why the path is invalid
        reason: String,
    },

    /// File was not found
    #[error("File not found: '{path}'")]
    FileNotFound {
        /// The missing file path
        path: PathBuf,
    },

    /// Permission was denied
    #[error("Permission denied for '{path}'")]
    PermissionDenied {
        /// The path with permission issues
        path: PathBuf,
    },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The source dataset is not parseable JSON
    #[error("Malformed input JSON at line {line}, column {column}: {message}")]
    MalformedInput {
        /// 1-based line of the failure
        line: usize,
        /// 1-based column of the failure
        column: usize,
        /// Parser description of the problem
        message: String,
    },
}

/// Compression stage errors.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The canonical text is larger than any decoder would accept
    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Canonical text length
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// The compressor produced no bytes for a non-empty payload
    #[error("Compressor produced no output for a {size} byte payload")]
    EmptyOutput {
        /// Canonical text length
        size: usize,
    },
}

/// Decode stage errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The artifact text is not strict standard base64
    #[error("Invalid base64 in artifact: {source}")]
    InvalidBase64 {
        /// The underlying error
        #[source]
        source: base64::DecodeError,
    },

    /// The LZ4 stream is truncated or structurally invalid
    #[error("Corrupt compressed stream: {message}")]
    CorruptCompressedStream {
        /// Description of the fault
        message: String,
    },

    /// Decompressed output would exceed the configured ceiling
    #[error("Decompressed payload exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Configured maximum
        limit: usize,
    },

    /// The decompressed payload is not valid UTF-8 JSON
    #[error("Invalid JSON in decompressed payload: {message}")]
    InvalidJson {
        /// Description of the parse failure
        message: String,
    },
}

/// Configuration errors.
///
/// These errors occur when options or configuration are invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid option value
    #[error("Invalid {option} option: {message}")]
    InvalidOption {
        /// The option name
        option: String,
        /// Why it's invalid
        message: String,
    },
}

/// Type alias for Results using `MapCodecError`.
pub type Result<T> = std::result::Result<T, MapCodecError>;

impl MapCodecError {
    /// Get a user-friendly error message.
    ///
    /// This formats the error in a way that's helpful for end users,
    /// naming the stage that failed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => e.user_message(),
            Self::Format(e) => format!("Input error: {e}"),
            Self::Compression(e) => format!("Compression error: {e}"),
            Self::Retrieval(e) => format!("Retrieval error: {e}"),
            Self::Decode(e) => format!("Decode error: {e}"),
            Self::Config(e) => format!("Configuration error: {e}"),
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Io(e) => e.recovery_suggestion(),
            Self::Format(_) => {
                Some("Validate the source dataset with a JSON linter.".to_string())
            },
            Self::Compression(CompressionError::PayloadTooLarge { .. })
            | Self::Decode(DecodeError::PayloadTooLarge { .. }) => {
                Some("Raise the limit with --max-size if the dataset really is this large.".to_string())
            },
            Self::Retrieval(RetrievalError::NotFound { .. }) => {
                Some("Run 'mapcodec compress' to produce the artifact first.".to_string())
            },
            Self::Decode(_) => Some(
                "The artifact is damaged; regenerate it with 'mapcodec compress'.".to_string(),
            ),
            _ => None,
        }
    }

    /// Check if this error is potentially recoverable.
    ///
    /// Recoverable errors might be fixed by retrying with different
    /// parameters or after the user takes some action. The codec itself
    /// never retries.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Retrieval(RetrievalError::Timeout { .. } | RetrievalError::Network { .. })
        )
    }
}

impl IoError {
    fn user_message(&self) -> String {
        match self {
            Self::Read { format, path, .. } => {
                format!("Failed to read {} file: {}", format, path.display())
            },
            Self::Write { format, path, .. } => {
                format!("Failed to write {} file: {}", format, path.display())
            },
            Self::FileNotFound { path } => {
                format!("File not found: {}", path.display())
            },
            _ => self.to_string(),
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Check that the file path is correct and the file exists.".to_string())
            },
            Self::PermissionDenied { .. } => {
                Some("Check file permissions and ensure you have access.".to_string())
            },
            Self::InvalidPath { .. } => {
                Some("Ensure the path is valid and properly formatted.".to_string())
            },
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::MalformedInput {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Extension trait for adding I/O context to errors.
///
/// This trait provides convenient methods to wrap errors with file and format
/// context, creating more informative error messages.
pub trait IoErrorExt<T> {
    /// Add read context to an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError::Read`] if the underlying operation fails.
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;

    /// Add write context to an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError::Write`] if the underlying operation fails.
    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> IoErrorExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            MapCodecError::Io(IoError::Read {
                format: format.to_string(),
                path: path.into(),
                source: Box::new(e),
            })
        })
    }

    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            MapCodecError::Io(IoError::Write {
                format: format.to_string(),
                path: path.into(),
                source: Box::new(e),
            })
        })
    }
}

/// Maps a failed `std::io` read to the most specific [`IoError`].
pub(crate) fn classify_read_error(
    err: std::io::Error,
    format: &str,
    path: impl Into<PathBuf>,
) -> MapCodecError {
    let path = path.into();
    match err.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound { path }.into(),
        std::io::ErrorKind::PermissionDenied => IoError::PermissionDenied { path }.into(),
        _ => IoError::Read {
            format: format.to_string(),
            path,
            source: Box::new(err),
        }
        .into(),
    }
}

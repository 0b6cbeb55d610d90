//! Codec configuration.
//!
//! File locations and the decompression ceiling are passed explicitly to every
//! entry point. [`CodecConfig::default`] supplies the locations the site build
//! has always used.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default location of the authored dataset.
pub const DEFAULT_SOURCE_PATH: &str = "public/korea.json";

/// Default location of the transport artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "public/korea.compressed.txt";

/// Default location of the decompressed debug copy.
pub const DEFAULT_DECOMPRESSED_PATH: &str = "public/korea.decompressed.json";

/// Upper bound on decompressed payload size (64 MiB).
///
/// The authored Korea map is a few MiB of minified JSON.
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 64 * 1024 * 1024;

/// Default timeout for HTTP retrieval.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Locations and limits for one encoder/decoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Authored GeoDataset JSON read by the encoder.
    pub source_path: PathBuf,
    /// Transport artifact written by the encoder and read by the decoder.
    pub artifact_path: PathBuf,
    /// Decompressed JSON written for manual inspection.
    pub decompressed_path: PathBuf,
    /// Largest canonical payload either side will handle.
    pub max_decompressed_size: usize,
    /// Timeout applied to HTTP retrieval.
    pub fetch_timeout: Duration,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            decompressed_path: PathBuf::from(DEFAULT_DECOMPRESSED_PATH),
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl CodecConfig {
    /// Sets the source dataset path.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Sets the artifact path.
    #[must_use]
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Sets the decompressed debug output path.
    #[must_use]
    pub fn with_decompressed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.decompressed_path = path.into();
        self
    }

    /// Sets the payload ceiling.
    #[must_use]
    pub fn with_max_decompressed_size(mut self, limit: usize) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    /// Sets the HTTP retrieval timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Checks that the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for a zero payload ceiling or a
    /// zero fetch timeout.
    pub fn validate(&self) -> Result<()> {
        if self.max_decompressed_size == 0 {
            return Err(ConfigError::InvalidOption {
                option: "max-size".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidOption {
                option: "timeout".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

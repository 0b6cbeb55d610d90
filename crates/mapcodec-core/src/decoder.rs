//! Runtime decoder: transport artifact back to dataset.
//!
//! Decoding either returns a complete dataset or an error; no partially
//! parsed value ever reaches the caller. Nothing is cached between calls.

use log::{debug, info};
use serde_json::Value;

use mapcodec_core_common::ArtifactSource;

use crate::codec::{self, TransportFormat, decode_base64, parse_canonical};
use crate::config::{CodecConfig, DEFAULT_MAX_DECOMPRESSED_SIZE};
use crate::error::Result;

/// Decompressed canonical payload and what it was unpacked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflated {
    /// Layout detected inside the artifact.
    pub format: TransportFormat,
    /// Size of the compressed bytes after base64 decoding.
    pub compressed_bytes: usize,
    /// UTF-8 bytes of the canonical JSON text.
    pub canonical: Vec<u8>,
}

/// Turns transport artifacts back into datasets.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_decompressed_size: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DECOMPRESSED_SIZE)
    }
}

impl Decoder {
    /// Creates a decoder that refuses to inflate beyond
    /// `max_decompressed_size` bytes.
    #[must_use]
    pub fn new(max_decompressed_size: usize) -> Self {
        Self {
            max_decompressed_size,
        }
    }

    /// Creates a decoder using the configured payload ceiling.
    #[must_use]
    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.max_decompressed_size)
    }

    /// Reverses base64 and LZ4, stopping short of JSON parsing.
    ///
    /// # Errors
    ///
    /// Returns a `Decode` error (`InvalidBase64`, `CorruptCompressedStream`
    /// or `PayloadTooLarge`).
    pub fn inflate(&self, artifact: &[u8]) -> Result<Inflated> {
        let compressed = decode_base64(artifact)?;
        let (format, canonical) = codec::decompress(&compressed, self.max_decompressed_size)?;
        debug!(
            "Inflated {} {} bytes to {} canonical bytes",
            compressed.len(),
            format.short_name(),
            canonical.len()
        );
        Ok(Inflated {
            format,
            compressed_bytes: compressed.len(),
            canonical,
        })
    }

    /// Decodes artifact bytes into a dataset.
    ///
    /// # Errors
    ///
    /// Returns a `Decode` error for invalid base64, a corrupt or oversized
    /// compressed stream, or invalid JSON.
    pub fn decode_artifact(&self, artifact: &[u8]) -> Result<Value> {
        let inflated = self.inflate(artifact)?;
        Ok(parse_canonical(&inflated.canonical)?)
    }

    /// Decodes artifact text into a dataset.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_artifact`].
    pub fn decode_text(&self, artifact: &str) -> Result<Value> {
        self.decode_artifact(artifact.as_bytes())
    }

    /// Retrieves the artifact from `source` and decodes it.
    ///
    /// Retrieval failures are returned as-is; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns a `Retrieval` error if the fetch fails, otherwise the errors of
    /// [`Decoder::decode_artifact`].
    pub async fn fetch_and_decode(&self, source: &dyn ArtifactSource) -> Result<Value> {
        info!("Fetching map artifact from {}", source.location());
        let artifact = source.fetch().await?;
        debug!("Fetched {} artifact bytes", artifact.len());
        self.decode_artifact(&artifact)
    }
}

//! Build-time encoder: dataset JSON to transport artifact.
//!
//! Encoding is deterministic. The same input always yields byte-identical
//! artifact text, since nothing time- or randomness-dependent enters the
//! pipeline.

use log::debug;
use serde_json::Value;

use crate::codec::{canonical_text, compress_block, encode_base64};
use crate::config::{CodecConfig, DEFAULT_MAX_DECOMPRESSED_SIZE};
use crate::error::{FormatError, Result};

/// Artifact text together with the sizes of each intermediate stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    /// Base64 artifact text, ready to write.
    pub artifact: String,
    /// Length of the minified JSON in bytes.
    pub canonical_bytes: usize,
    /// Length of the LZ4 block in bytes.
    pub compressed_bytes: usize,
}

/// Parses JSON input and returns its canonical minified text.
///
/// # Errors
///
/// Returns [`FormatError::MalformedInput`] if `input` is not UTF-8 JSON.
pub fn minify(input: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(input).map_err(FormatError::from)?;
    Ok(canonical_text(&value))
}

/// Turns datasets into transport artifacts.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    max_payload_size: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DECOMPRESSED_SIZE)
    }
}

impl Encoder {
    /// Creates an encoder refusing canonical payloads larger than
    /// `max_payload_size` bytes.
    #[must_use]
    pub fn new(max_payload_size: usize) -> Self {
        Self { max_payload_size }
    }

    /// Creates an encoder using the configured payload ceiling.
    #[must_use]
    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.max_decompressed_size)
    }

    /// Encodes raw JSON input (the contents of the authored source file).
    ///
    /// # Errors
    ///
    /// Returns a `Format` error for malformed input and a `Compression` error
    /// when the payload exceeds the ceiling.
    pub fn encode_json(&self, input: &[u8]) -> Result<EncodedArtifact> {
        let canonical = minify(input)?;
        debug!(
            "Minified {} input bytes to {} canonical bytes",
            input.len(),
            canonical.len()
        );
        self.encode_canonical(&canonical)
    }

    /// Encodes JSON text.
    ///
    /// # Errors
    ///
    /// See [`Encoder::encode_json`].
    pub fn encode_text(&self, text: &str) -> Result<EncodedArtifact> {
        self.encode_json(text.as_bytes())
    }

    /// Encodes an in-memory dataset.
    ///
    /// # Errors
    ///
    /// Returns a `Compression` error when the payload exceeds the ceiling.
    pub fn encode_value(&self, value: &Value) -> Result<EncodedArtifact> {
        self.encode_canonical(&canonical_text(value))
    }

    fn encode_canonical(&self, canonical: &str) -> Result<EncodedArtifact> {
        let compressed = compress_block(canonical.as_bytes(), self.max_payload_size)?;
        let artifact = encode_base64(&compressed);
        debug!(
            "Compressed {} canonical bytes to {} block bytes ({} artifact bytes)",
            canonical.len(),
            compressed.len(),
            artifact.len()
        );
        Ok(EncodedArtifact {
            artifact,
            canonical_bytes: canonical.len(),
            compressed_bytes: compressed.len(),
        })
    }
}

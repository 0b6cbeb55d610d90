//! Transport framing shared by the encoder and decoder.
//!
//! An artifact is `base64(lz4_block(minified_json_utf8))`: standard alphabet
//! with padding, a bare LZ4 block with no size prefix, no frame header and no
//! checksum. Artifacts produced by frame-mode LZ4 tools are recognised by the
//! frame magic number and accepted on read.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lz4_flex::block::{self, DecompressError};
use lz4_flex::frame::FrameDecoder;
use serde_json::Value;

use mapcodec_core_common::Format;

use crate::error::{CompressionError, DecodeError};
use crate::formats;

/// Little-endian LZ4 frame magic number `0x184D2204`.
///
/// A bare block cannot start with these bytes: token `0x04` carries no
/// literals, so the match offset `0x4D22` would point before the start of the
/// output.
pub const LZ4_FRAME_MAGIC: [u8; 4] = [0x04, 0x22, 0x4D, 0x18];

/// Smallest output buffer tried for block decompression.
const MIN_OUTPUT_CAPACITY: usize = 4 * 1024;

/// Compressed layout found inside an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFormat {
    /// Bare LZ4 block, the layout the encoder writes.
    Lz4Block,
    /// LZ4 frame, accepted for artifacts written by frame-mode tools.
    Lz4Frame,
}

impl TransportFormat {
    /// Registry entry describing this layout.
    #[must_use]
    pub fn descriptor(self) -> Format {
        match self {
            TransportFormat::Lz4Block => formats::LZ4_BLOCK,
            TransportFormat::Lz4Frame => formats::LZ4_FRAME,
        }
    }

    /// Short name as listed by `mapcodec formats`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        self.descriptor().short_name
    }
}

/// Classifies decoded artifact bytes by their leading magic.
#[must_use]
pub fn detect_format(compressed: &[u8]) -> TransportFormat {
    if compressed.starts_with(&LZ4_FRAME_MAGIC) {
        TransportFormat::Lz4Frame
    } else {
        TransportFormat::Lz4Block
    }
}

/// Serializes a dataset to its canonical minified text.
///
/// Keys keep their insertion order and floats use the shortest representation
/// that parses back to the same `f64`.
#[must_use]
pub fn canonical_text(value: &Value) -> String {
    value.to_string()
}

/// Encodes bytes as padded standard base64 with no line breaks.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes artifact text as strict standard base64.
///
/// One trailing `\n` or `\r\n` is tolerated; any other whitespace, a
/// non-alphabet character, bad padding or non-zero trailing bits is rejected.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidBase64`] for anything that is not canonical
/// base64.
pub fn decode_base64(text: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let text = text
        .strip_suffix(b"\r\n")
        .or_else(|| text.strip_suffix(b"\n"))
        .unwrap_or(text);
    STANDARD
        .decode(text)
        .map_err(|source| DecodeError::InvalidBase64 { source })
}

/// Compresses a canonical payload into a bare LZ4 block.
///
/// # Errors
///
/// Returns [`CompressionError::PayloadTooLarge`] when `payload` exceeds `limit`
/// (no decoder using the same limit could inflate it), or
/// [`CompressionError::EmptyOutput`] if the compressor emits nothing.
pub fn compress_block(payload: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
    if payload.len() > limit {
        return Err(CompressionError::PayloadTooLarge {
            size: payload.len(),
            limit,
        });
    }
    let compressed = block::compress(payload);
    if compressed.is_empty() && !payload.is_empty() {
        return Err(CompressionError::EmptyOutput {
            size: payload.len(),
        });
    }
    Ok(compressed)
}

/// Decompresses a bare LZ4 block without reading or writing out of bounds.
///
/// The block carries no size prefix, so the output buffer starts at four times
/// the input (at least 4 KiB) and doubles while the decoder reports it too
/// small, never past `limit`.
///
/// # Errors
///
/// - [`DecodeError::CorruptCompressedStream`] for empty, truncated or
///   structurally invalid input.
/// - [`DecodeError::PayloadTooLarge`] when the output would exceed `limit`.
pub fn decompress_block(compressed: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    if compressed.is_empty() {
        return Err(DecodeError::CorruptCompressedStream {
            message: "empty block".to_string(),
        });
    }

    let mut capacity = compressed
        .len()
        .saturating_mul(4)
        .max(MIN_OUTPUT_CAPACITY)
        .min(limit);

    loop {
        let mut output = vec![0u8; capacity];
        match block::decompress_into(compressed, &mut output) {
            Ok(written) => {
                output.truncate(written);
                return Ok(output);
            },
            Err(DecompressError::OutputTooSmall { .. }) if capacity < limit => {
                capacity = capacity.saturating_mul(2).min(limit);
                log::trace!("Growing block output buffer to {capacity} bytes");
            },
            Err(DecompressError::OutputTooSmall { .. }) => {
                return Err(DecodeError::PayloadTooLarge { limit });
            },
            Err(err) => {
                return Err(DecodeError::CorruptCompressedStream {
                    message: err.to_string(),
                });
            },
        }
    }
}

/// Decompresses an LZ4 frame, reading at most `limit + 1` output bytes.
///
/// # Errors
///
/// - [`DecodeError::CorruptCompressedStream`] when the frame is malformed or
///   fails its checksum.
/// - [`DecodeError::PayloadTooLarge`] when the output would exceed `limit`.
pub fn decompress_frame(compressed: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut reader = FrameDecoder::new(compressed).take(cap);
    let mut output = Vec::new();
    reader
        .read_to_end(&mut output)
        .map_err(|err| DecodeError::CorruptCompressedStream {
            message: err.to_string(),
        })?;
    if output.len() > limit {
        return Err(DecodeError::PayloadTooLarge { limit });
    }
    Ok(output)
}

/// Decompresses bytes in whichever layout [`detect_format`] reports.
///
/// # Errors
///
/// Propagates the errors of [`decompress_block`] or [`decompress_frame`].
pub fn decompress(
    compressed: &[u8],
    limit: usize,
) -> Result<(TransportFormat, Vec<u8>), DecodeError> {
    let format = detect_format(compressed);
    let output = match format {
        TransportFormat::Lz4Block => decompress_block(compressed, limit)?,
        TransportFormat::Lz4Frame => decompress_frame(compressed, limit)?,
    };
    Ok((format, output))
}

/// Parses decompressed canonical text.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] if the bytes are not UTF-8 JSON.
pub fn parse_canonical(canonical: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(canonical).map_err(|err| DecodeError::InvalidJson {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_canonical_text_is_minified() {
        let value: Value =
            serde_json::from_str("{ \"b\" : [ 1 , 2.5 ],\n  \"a\": \"x y\" }").unwrap();
        assert_eq!(canonical_text(&value), r#"{"b":[1,2.5],"a":"x y"}"#);
    }

    #[test]
    fn test_base64_accepts_single_trailing_newline() {
        assert_eq!(decode_base64(b"e30=\n").unwrap(), b"{}");
        assert_eq!(decode_base64(b"e30=\r\n").unwrap(), b"{}");
    }

    #[test]
    fn test_base64_rejects_embedded_whitespace() {
        let err = decode_base64(b"e3 0=").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64 { .. }));
        let err = decode_base64(b"e30=\n\n").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64 { .. }));
    }

    #[test]
    fn test_base64_rejects_missing_padding() {
        let err = decode_base64(b"e30").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64 { .. }));
    }

    #[test]
    fn test_block_round_trip() {
        let payload = br#"{"regions":[{"name":"Seoul","points":[[0,0],[1,1]]}]}"#;
        let compressed = compress_block(payload, 1024).unwrap();
        assert_eq!(detect_format(&compressed), TransportFormat::Lz4Block);
        assert_eq!(decompress_block(&compressed, 1024).unwrap(), payload);
    }

    #[test]
    fn test_block_output_grows_past_initial_capacity() {
        let payload = vec![b'a'; 200_000];
        let compressed = compress_block(&payload, usize::MAX).unwrap();
        assert!(compressed.len() * 4 < payload.len());
        assert_eq!(decompress_block(&compressed, 1 << 20).unwrap(), payload);
    }

    #[test]
    fn test_block_limit_enforced() {
        let payload = vec![b'a'; 100_000];
        let compressed = compress_block(&payload, usize::MAX).unwrap();
        let err = decompress_block(&compressed, 50_000).unwrap_err();
        assert!(matches!(err, DecodeError::PayloadTooLarge { limit: 50_000 }));
    }

    #[test]
    fn test_compress_rejects_oversized_payload() {
        let err = compress_block(&[b'x'; 10], 9).unwrap_err();
        assert!(matches!(
            err,
            CompressionError::PayloadTooLarge { size: 10, limit: 9 }
        ));
    }

    #[test]
    fn test_empty_block_is_corrupt() {
        let err = decompress_block(&[], 1024).unwrap_err();
        assert!(matches!(err, DecodeError::CorruptCompressedStream { .. }));
    }

    #[test]
    fn test_frame_detected_and_decoded() {
        let payload = br#"{"regions":[]}"#;
        let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
        encoder.write_all(payload).unwrap();
        let framed = encoder.finish().unwrap();

        assert_eq!(detect_format(&framed), TransportFormat::Lz4Frame);
        let (format, output) = decompress(&framed, 1024).unwrap();
        assert_eq!(format, TransportFormat::Lz4Frame);
        assert_eq!(output, payload);
    }

    #[test]
    fn test_frame_limit_enforced() {
        let payload = vec![b'z'; 10_000];
        let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
        encoder.write_all(&payload).unwrap();
        let framed = encoder.finish().unwrap();

        let err = decompress_frame(&framed, 1_000).unwrap_err();
        assert!(matches!(err, DecodeError::PayloadTooLarge { limit: 1_000 }));
    }

    #[test]
    fn test_truncated_frame_is_corrupt() {
        let mut framed = LZ4_FRAME_MAGIC.to_vec();
        framed.push(0x64);
        let err = decompress_frame(&framed, 1024).unwrap_err();
        assert!(matches!(err, DecodeError::CorruptCompressedStream { .. }));
    }

    #[test]
    fn test_parse_canonical_rejects_invalid_utf8() {
        let err = parse_canonical(&[b'"', 0xFF, b'"']).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson { .. }));
    }
}

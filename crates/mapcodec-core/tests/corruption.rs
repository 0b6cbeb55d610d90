use std::io::Write;
use std::sync::LazyLock;

use mapcodec_core::codec::{self, decompress_block, encode_base64};
use mapcodec_core::error::DecodeError;
use mapcodec_core::{Decoder, Encoder, MapCodecError};
use proptest::prelude::*;
use serde_json::{Value, json};

static DATASET: LazyLock<Value> = LazyLock::new(|| {
    let regions: Vec<Value> = (0..40_i32)
        .map(|i| {
            json!({
                "name": format!("Chapter {i}"),
                "points": [[126.9 + f64::from(i) * 0.05, 37.5], [127.0, 37.6], [126.95, 37.45]],
            })
        })
        .collect();
    json!({ "regions": regions })
});

static ARTIFACT: LazyLock<String> =
    LazyLock::new(|| Encoder::default().encode_value(&DATASET).unwrap().artifact);

const SMALL_LIMIT: usize = 64 * 1024;

fn is_decode_error(result: &Result<Value, MapCodecError>) -> bool {
    matches!(result, Err(MapCodecError::Decode(_)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn truncated_artifacts_are_rejected(cut in 0usize..1000) {
        let cut = cut % ARTIFACT.len();
        let result = Decoder::default().decode_text(&ARTIFACT[..cut]);
        prop_assert!(is_decode_error(&result), "cut at {} gave {:?}", cut, result);
    }

    #[test]
    fn corrupted_artifacts_never_escape_decode_errors(
        position in 0usize..10_000,
        replacement in prop::sample::select(
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/".to_vec()
        ),
    ) {
        let mut corrupted = ARTIFACT.as_bytes().to_vec();
        let position = position % corrupted.len();
        corrupted[position] = replacement;
        let result = Decoder::new(SMALL_LIMIT).decode_artifact(&corrupted);
        prop_assert!(result.is_ok() || is_decode_error(&result), "{:?}", result);
    }

    #[test]
    fn random_blocks_stay_in_bounds(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        match decompress_block(&bytes, SMALL_LIMIT) {
            Ok(output) => prop_assert!(output.len() <= SMALL_LIMIT),
            Err(err) => prop_assert!(matches!(
                err,
                DecodeError::CorruptCompressedStream { .. } | DecodeError::PayloadTooLarge { .. }
            ), "{:?}", err),
        }
    }

    #[test]
    fn random_artifacts_terminate(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let result = Decoder::new(SMALL_LIMIT).decode_text(&encode_base64(&bytes));
        prop_assert!(result.is_ok() || is_decode_error(&result), "{:?}", result);
    }

    #[test]
    fn foreign_characters_are_invalid_base64(
        position in 0usize..10_000,
        intruder in prop::sample::select(b"!#$%&*-_.:; \t".to_vec()),
    ) {
        let mut corrupted = ARTIFACT.as_bytes().to_vec();
        let position = position % corrupted.len();
        corrupted.insert(position, intruder);
        let result = Decoder::default().decode_artifact(&corrupted);
        prop_assert!(
            matches!(result, Err(MapCodecError::Decode(DecodeError::InvalidBase64 { .. }))),
            "{:?}",
            result
        );
    }
}

fn expect_invalid_base64(artifact: &str) {
    let result = Decoder::default().decode_text(artifact);
    assert!(
        matches!(
            result,
            Err(MapCodecError::Decode(DecodeError::InvalidBase64 { .. }))
        ),
        "{artifact:?} gave {result:?}"
    );
}

#[test]
fn base64_padding_edge_cases() {
    expect_invalid_base64("e30");
    expect_invalid_base64("e30==");
    expect_invalid_base64("e3==");
    expect_invalid_base64("=e30");
    expect_invalid_base64("e30=e30=");
}

#[test]
fn base64_whitespace_edge_cases() {
    expect_invalid_base64(" e30=");
    expect_invalid_base64("e3\n0=");
    expect_invalid_base64("e30=\n\n");
    expect_invalid_base64("e30=\t");
}

#[test]
fn base64_alphabet_edge_cases() {
    expect_invalid_base64("e3-0");
    expect_invalid_base64("e3_0");
    expect_invalid_base64("e30\u{00e9}");
}

#[test]
fn empty_artifact_is_corrupt_stream() {
    let result = Decoder::default().decode_text("");
    assert!(matches!(
        result,
        Err(MapCodecError::Decode(
            DecodeError::CorruptCompressedStream { .. }
        ))
    ));
}

#[test]
fn decompression_bomb_is_refused() {
    let payload = format!("\"{}\"", "a".repeat(1 << 20));
    let compressed = codec::compress_block(payload.as_bytes(), usize::MAX).unwrap();
    let artifact = encode_base64(&compressed);
    assert!(artifact.len() < 16 * 1024);

    let result = Decoder::new(SMALL_LIMIT).decode_text(&artifact);
    assert!(matches!(
        result,
        Err(MapCodecError::Decode(DecodeError::PayloadTooLarge {
            limit: SMALL_LIMIT
        }))
    ));
}

#[test]
fn legacy_frame_artifacts_decode() {
    let canonical = DATASET.to_string();
    let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
    encoder.write_all(canonical.as_bytes()).unwrap();
    let artifact = encode_base64(&encoder.finish().unwrap());

    let inflated = Decoder::default().inflate(artifact.as_bytes()).unwrap();
    assert_eq!(inflated.format, codec::TransportFormat::Lz4Frame);
    assert_eq!(Decoder::default().decode_text(&artifact).unwrap(), *DATASET);
}

#[test]
fn non_json_payload_is_invalid_json() {
    let compressed = codec::compress_block(b"{\"regions\": [", 1024).unwrap();
    let result = Decoder::default().decode_text(&encode_base64(&compressed));
    assert!(matches!(
        result,
        Err(MapCodecError::Decode(DecodeError::InvalidJson { .. }))
    ));
}

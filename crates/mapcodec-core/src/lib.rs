//! `mapcodec-core` is the codec behind the compressed map payload: the
//! build-time encoder that turns the authored GeoDataset JSON into a transport
//! artifact, and the runtime decoder that turns it back.
//!
//! An artifact is `base64(lz4_block(minified_json_utf8))` with no header,
//! version tag, length prefix or checksum.
//!
//! This crate includes:
//! - **Codec**: base64 and LZ4 framing shared by both directions, with a
//!   bounded decompressor.
//! - **Encoder / Decoder**: in-memory conversion between datasets and artifacts.
//! - **Sources**: file and HTTP retrieval of artifacts.
//! - **Operations**: the file-level compress, decompress and inspect steps.
//! - **Format Registry**: the encodings the codec knows and what it can do with them.
//!
//! ```
//! use mapcodec_core::{Decoder, Encoder};
//!
//! let text = r#"{"regions":[{"name":"Seoul","points":[[0,0],[1,1]]}]}"#;
//! let encoded = Encoder::default().encode_text(text).unwrap();
//! let dataset = Decoder::default().decode_text(&encoded.artifact).unwrap();
//! assert_eq!(dataset["regions"][0]["name"], "Seoul");
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod formats;
pub mod operations;
pub mod sources;
pub mod types;

pub use config::CodecConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{MapCodecError, Result};

//! Registry of map payload encodings and their capabilities.
//!
//! The registry lists every layout the codec knows about, including the legacy
//! frame layout it only reads and the versioned layout that does not exist yet.
//!
//! # Examples
//!
//! ```
//! use mapcodec_core::formats::{find_format, get_available_formats};
//!
//! let block = find_format("lz4-block").expect("lz4-block should exist");
//! assert!(block.capabilities.write.is_supported());
//!
//! for format in get_available_formats() {
//!     println!("{}: {}", format.short_name, format.long_name);
//! }
//! ```

pub use mapcodec_core_common::formats::{Format, FormatCapabilities, SupportStatus};

/// Decompressed canonical JSON, the debug copy written by `decompress`.
pub const JSON: Format = Format::new(
    "json",
    "Minified JSON (decompressed debug copy)",
    SupportStatus::Supported,
    SupportStatus::Supported,
    SupportStatus::Supported,
);

/// The transport artifact: `base64(lz4_block(minified_json))`.
pub const LZ4_BLOCK: Format = Format::new(
    "lz4-block",
    "Base64 text of a bare LZ4 block of minified JSON",
    SupportStatus::Supported,
    SupportStatus::Supported,
    SupportStatus::Supported,
);

/// Artifacts written by frame-mode LZ4 tools. Read only.
pub const LZ4_FRAME: Format = Format::new(
    "lz4-frame",
    "Base64 text of an LZ4 frame of JSON (legacy)",
    SupportStatus::Supported,
    SupportStatus::Supported,
    SupportStatus::NotSupported,
);

/// Block artifact prefixed with a schema version tag.
pub const LZ4_BLOCK_V1: Format = Format::new(
    "lz4-block-v1",
    "Versioned block artifact with a leading tag byte",
    SupportStatus::Planned,
    SupportStatus::Planned,
    SupportStatus::Planned,
);

/// Returns the complete registry of known encodings.
#[must_use]
pub fn get_formats() -> Vec<Format> {
    vec![JSON, LZ4_BLOCK, LZ4_FRAME, LZ4_BLOCK_V1]
}

/// Returns all encodings that have at least one fully supported operation.
#[must_use]
pub fn get_available_formats() -> Vec<Format> {
    get_formats()
        .into_iter()
        .filter(|f| f.capabilities.has_supported_operation())
        .collect()
}

/// Finds an encoding by its short name (case-insensitive).
///
/// # Examples
///
/// ```
/// use mapcodec_core::formats::find_format;
///
/// let format = find_format("LZ4-Frame").expect("lz4-frame should exist");
/// assert_eq!(format.short_name, "lz4-frame");
/// assert!(find_format("gzip").is_none());
/// ```
#[must_use]
pub fn find_format(name: &str) -> Option<Format> {
    get_formats()
        .into_iter()
        .find(|f| f.short_name.eq_ignore_ascii_case(name))
}

/// Lists the encodings that fully support every requested operation.
///
/// A `false` argument means the operation is not required.
#[must_use]
pub fn list_formats_with_capability(read: bool, write: bool, info: bool) -> Vec<Format> {
    get_formats()
        .into_iter()
        .filter(|f| {
            let read_ok = !read || f.capabilities.read.is_supported();
            let write_ok = !write || f.capabilities.write.is_supported();
            let info_ok = !info || f.capabilities.info.is_supported();
            read_ok && write_ok && info_ok
        })
        .collect()
}

/// Returns all short names in sorted order.
#[must_use]
pub fn get_format_names() -> Vec<&'static str> {
    let mut names: Vec<_> = get_formats().iter().map(|f| f.short_name).collect();
    names.sort_unstable();
    names
}

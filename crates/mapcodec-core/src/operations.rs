//! File-level codec operations.
//!
//! These wrap the encoder and decoder with the reads and writes the site build
//! performs: compress the authored dataset into the published artifact, and
//! expand an artifact back into JSON for inspection. Every write goes to a
//! temporary file in the destination directory and is renamed into place, so
//! a failed run never leaves a partially written file behind.

use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::codec::parse_canonical;
use crate::config::CodecConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{IoError, IoErrorExt, Result, classify_read_error};
use crate::sources::source_for;
use crate::types::{ArtifactInfo, EncodeReport};

/// Compresses the dataset at `source` into the artifact at `artifact`.
///
/// # Arguments
///
/// * `source` - Path of the authored GeoDataset JSON.
/// * `artifact` - Path the transport artifact is written to.
/// * `config` - Limits applied to the payload.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid.
/// - The source cannot be read or is not JSON.
/// - The payload exceeds the configured ceiling.
/// - The artifact cannot be written; the previous artifact is then untouched.
pub fn compress_map(source: &Path, artifact: &Path, config: &CodecConfig) -> Result<EncodeReport> {
    config.validate()?;
    info!("Compressing {} -> {}", source.display(), artifact.display());

    let input = std::fs::read(source).map_err(|e| classify_read_error(e, "source JSON", source))?;
    let encoded = Encoder::from_config(config).encode_json(&input)?;
    write_atomic(artifact, encoded.artifact.as_bytes(), "artifact")?;

    let report = EncodeReport {
        source_bytes: input.len(),
        canonical_bytes: encoded.canonical_bytes,
        compressed_bytes: encoded.compressed_bytes,
        artifact_bytes: encoded.artifact.len(),
    };
    info!(
        "Wrote {} artifact bytes ({} canonical bytes)",
        report.artifact_bytes, report.canonical_bytes
    );
    Ok(report)
}

/// Decodes the artifact at `location` and writes its JSON to `output`.
///
/// The JSON is written exactly as it was compressed unless `pretty` is set, in
/// which case it is re-serialized with indentation.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid.
/// - The artifact cannot be retrieved or decoded.
/// - The output cannot be written.
pub async fn decompress_map(
    location: &str,
    output: &Path,
    config: &CodecConfig,
    pretty: bool,
) -> Result<ArtifactInfo> {
    config.validate()?;
    info!("Decompressing {location} -> {}", output.display());

    let source = source_for(location, config.fetch_timeout)?;
    let artifact = source.fetch().await?;
    let inflated = Decoder::from_config(config).inflate(&artifact)?;
    let value = parse_canonical(&inflated.canonical)?;

    if pretty {
        write_atomic(output, format!("{value:#}").as_bytes(), "decompressed JSON")?;
    } else {
        write_atomic(output, &inflated.canonical, "decompressed JSON")?;
    }

    Ok(ArtifactInfo::new(location, artifact.len(), &inflated, &value))
}

/// Decodes the artifact at `location` and reports what it contains.
///
/// # Errors
///
/// This function will return an error if the configuration is invalid or the
/// artifact cannot be retrieved or decoded.
pub async fn inspect_artifact(location: &str, config: &CodecConfig) -> Result<ArtifactInfo> {
    config.validate()?;
    info!("Inspecting {location}");

    let source = source_for(location, config.fetch_timeout)?;
    let artifact = source.fetch().await?;
    let inflated = Decoder::from_config(config).inflate(&artifact)?;
    let value = parse_canonical(&inflated.canonical)?;
    Ok(ArtifactInfo::new(location, artifact.len(), &inflated, &value))
}

/// Mode given to a newly created output file, before the umask is applied.
///
/// Same as `std::fs::write`, so a static host running as another user can
/// serve the artifact.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Replaces `path` with `contents` via a temporary file and rename.
///
/// An existing destination keeps its permissions. A new one gets the mode a
/// plain write would have given it.
///
/// # Errors
///
/// Returns [`IoError::InvalidPath`] when `path` has no file name and
/// [`IoError::Write`] when any step fails. On failure the destination is left
/// as it was.
pub fn write_atomic(path: &Path, contents: &[u8], what: &str) -> Result<()> {
    if path.file_name().is_none() {
        return Err(IoError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path has no file name".to_string(),
        }
        .into());
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if existing.is_none() {
            builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
        }
    }

    let mut tmp = builder.tempfile_in(dir).with_write_context(what, path)?;
    debug!("Staging {} bytes in {}", contents.len(), tmp.path().display());
    tmp.write_all(contents).with_write_context(what, path)?;
    tmp.as_file().sync_all().with_write_context(what, path)?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .with_write_context(what, path)?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_write_context(what, path)?;
    Ok(())
}

//! Reports produced by the file-level operations.

use serde_json::Value;

use crate::codec::TransportFormat;
use crate::decoder::Inflated;

/// Sizes observed while compressing a source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Bytes read from the source file
    pub source_bytes: usize,
    /// Bytes of minified JSON
    pub canonical_bytes: usize,
    /// Bytes of the LZ4 block
    pub compressed_bytes: usize,
    /// Bytes of base64 text written
    pub artifact_bytes: usize,
}

impl EncodeReport {
    /// Artifact size as a fraction of the minified JSON size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.canonical_bytes == 0 {
            return 0.0;
        }
        self.artifact_bytes as f64 / self.canonical_bytes as f64
    }
}

/// JSON kind of a value, as shown in inspection output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any number
    Number,
    /// A string
    String,
    /// An array
    Array,
    /// An object
    Object,
}

impl ValueKind {
    /// Classifies a JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// One top-level member of an object-rooted dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Member key
    pub name: String,
    /// Kind of the member value
    pub kind: ValueKind,
    /// Element or member count for containers, `None` for scalars
    pub len: Option<usize>,
}

/// Inspection report for a transport artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    /// Path or URL the artifact was read from
    pub location: String,
    /// Layout detected inside the artifact
    pub format: TransportFormat,
    /// Bytes of base64 text
    pub artifact_bytes: usize,
    /// Bytes after base64 decoding
    pub compressed_bytes: usize,
    /// Bytes of canonical JSON after decompression
    pub decompressed_bytes: usize,
    /// Kind of the root value
    pub root_kind: ValueKind,
    /// Member count of the root container (0 for scalars)
    pub root_len: usize,
    /// Top-level members, in document order, for object roots
    pub entries: Vec<EntryInfo>,
}

impl ArtifactInfo {
    /// Builds the report from an inflated artifact and its parsed dataset.
    #[must_use]
    pub fn new(location: &str, artifact_bytes: usize, inflated: &Inflated, value: &Value) -> Self {
        let entries = match value {
            Value::Object(map) => map
                .iter()
                .map(|(name, member)| EntryInfo {
                    name: name.clone(),
                    kind: ValueKind::of(member),
                    len: container_len(member),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            location: location.to_string(),
            format: inflated.format,
            artifact_bytes,
            compressed_bytes: inflated.compressed_bytes,
            decompressed_bytes: inflated.canonical.len(),
            root_kind: ValueKind::of(value),
            root_len: container_len(value).unwrap_or(0),
            entries,
        }
    }

    /// Artifact size as a fraction of the decompressed size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.decompressed_bytes == 0 {
            return 0.0;
        }
        self.artifact_bytes as f64 / self.decompressed_bytes as f64
    }
}

fn container_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artifact_info_lists_object_members() {
        let value = json!({"regions": [{"name": "Seoul"}, {"name": "Busan"}], "version": 3});
        let inflated = Inflated {
            format: TransportFormat::Lz4Block,
            compressed_bytes: 40,
            canonical: value.to_string().into_bytes(),
        };
        let info = ArtifactInfo::new("public/korea.compressed.txt", 56, &inflated, &value);

        assert_eq!(info.root_kind, ValueKind::Object);
        assert_eq!(info.root_len, 2);
        assert_eq!(info.entries.len(), 2);
        assert_eq!(info.entries[0].name, "regions");
        assert_eq!(info.entries[0].kind, ValueKind::Array);
        assert_eq!(info.entries[0].len, Some(2));
        assert_eq!(info.entries[1].name, "version");
        assert_eq!(info.entries[1].len, None);
    }

    #[test]
    fn test_artifact_info_array_root() {
        let value = json!([]);
        let inflated = Inflated {
            format: TransportFormat::Lz4Frame,
            compressed_bytes: 10,
            canonical: b"[]".to_vec(),
        };
        let info = ArtifactInfo::new("map.txt", 16, &inflated, &value);
        assert_eq!(info.root_kind, ValueKind::Array);
        assert_eq!(info.root_len, 0);
        assert!(info.entries.is_empty());
        assert!((info.ratio() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_encode_report_ratio() {
        let report = EncodeReport {
            source_bytes: 400,
            canonical_bytes: 200,
            compressed_bytes: 75,
            artifact_bytes: 100,
        };
        assert!((report.ratio() - 0.5).abs() < f64::EPSILON);
    }
}

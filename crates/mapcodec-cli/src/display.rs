//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions
//! for presenting codec reports in a human-readable format.

use std::path::Path;

use tabled::{Table, Tabled};

use mapcodec_core::formats::Format;
use mapcodec_core::types::{ArtifactInfo, EncodeReport};

/// Table row representation for a single report property.
#[derive(Tabled)]
pub struct PropertyRow {
    /// Property label.
    #[tabled(rename = "Property")]
    pub name: String,
    /// Formatted value.
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Table row representation for a top-level dataset member.
#[derive(Tabled)]
pub struct EntryRow {
    /// Member key.
    #[tabled(rename = "Key")]
    pub name: String,
    /// JSON kind of the member.
    #[tabled(rename = "Kind")]
    pub kind: String,
    /// Element count for containers.
    #[tabled(rename = "Items")]
    pub items: String,
}

/// Table row representation for displaying format information.
#[derive(Tabled)]
pub struct FormatRow {
    /// Short identifier for the encoding (e.g., `lz4-block`).
    #[tabled(rename = "Short Name")]
    pub short_name: String,
    /// Description of the byte layout.
    #[tabled(rename = "Long Name")]
    pub long_name: String,
    /// Support status for inspecting artifacts.
    #[tabled(rename = "Info")]
    pub info: String,
    /// Support status for decoding.
    #[tabled(rename = "Read")]
    pub read: String,
    /// Support status for encoding.
    #[tabled(rename = "Write")]
    pub write: String,
}

fn property(name: &str, value: impl ToString) -> PropertyRow {
    PropertyRow {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Builds the summary rows of an artifact report.
#[must_use]
pub fn artifact_rows(info: &ArtifactInfo) -> Vec<PropertyRow> {
    let descriptor = info.format.descriptor();
    vec![
        property("Location", &info.location),
        property(
            "Encoding",
            format!("{} ({})", descriptor.short_name, descriptor.long_name),
        ),
        property("Artifact bytes", info.artifact_bytes),
        property("Compressed bytes", info.compressed_bytes),
        property("Decompressed bytes", info.decompressed_bytes),
        property("Ratio", format!("{:.1}%", info.ratio() * 100.0)),
        property(
            "Root",
            format!("{} ({} items)", info.root_kind.as_str(), info.root_len),
        ),
    ]
}

/// Display an artifact report as tables on standard output.
pub fn display_artifact_info(info: &ArtifactInfo) {
    println!("\nArtifact: {}", info.location);
    println!("{}", Table::new(artifact_rows(info)));

    if !info.entries.is_empty() {
        println!("\n=== Top-level Entries ===");

        let entry_rows: Vec<EntryRow> = info
            .entries
            .iter()
            .map(|e| EntryRow {
                name: e.name.clone(),
                kind: e.kind.as_str().to_string(),
                items: e.len.map_or_else(|| "-".to_string(), |n| n.to_string()),
            })
            .collect();

        println!("{}", Table::new(entry_rows));
    }
}

/// Display the outcome of a compress run.
pub fn display_encode_report(report: &EncodeReport, source: &Path, artifact: &Path) {
    let rows = vec![
        property("Source", source.display()),
        property("Artifact", artifact.display()),
        property("Source bytes", report.source_bytes),
        property("Minified bytes", report.canonical_bytes),
        property("Compressed bytes", report.compressed_bytes),
        property("Artifact bytes", report.artifact_bytes),
        property("Ratio", format!("{:.1}%", report.ratio() * 100.0)),
    ];
    println!("{}", Table::new(rows));
}

/// Builds one row per registered format.
#[must_use]
pub fn format_rows(formats: &[Format]) -> Vec<FormatRow> {
    formats
        .iter()
        .map(|f| FormatRow {
            short_name: f.short_name.to_string(),
            long_name: f.long_name.to_string(),
            info: f.capabilities.info.as_str().to_string(),
            read: f.capabilities.read.as_str().to_string(),
            write: f.capabilities.write.as_str().to_string(),
        })
        .collect()
}

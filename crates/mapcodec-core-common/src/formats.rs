//! Capability model for map payload encodings.
//!
//! Each encoding the codec knows about (the bare transport artifact, the
//! legacy framed artifact, the decompressed JSON) is described by a [`Format`]
//! carrying its support status for inspection, reading and writing.

/// Support status for a specific format operation.
///
/// Indicates whether an operation (info, read, or write) is currently supported,
/// planned for future implementation, or not supported at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportStatus {
    /// The operation is fully supported and implemented.
    Supported,
    /// The operation is not supported for this format.
    NotSupported,
    /// The operation is planned for future implementation.
    Planned,
}

impl SupportStatus {
    /// Returns `true` if the operation is fully supported and implemented.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, SupportStatus::Supported)
    }

    /// Returns the string representation of this support status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SupportStatus::Supported => "Supported",
            SupportStatus::NotSupported => "Not Supported",
            SupportStatus::Planned => "Planned",
        }
    }
}

/// Operations a payload encoding supports.
#[derive(Debug, Clone, Copy)]
pub struct FormatCapabilities {
    /// Support status for inspecting artifacts in this encoding.
    pub info: SupportStatus,
    /// Support status for decoding artifacts in this encoding.
    pub read: SupportStatus,
    /// Support status for producing artifacts in this encoding.
    pub write: SupportStatus,
}

impl FormatCapabilities {
    /// Returns `true` if at least one operation is fully supported and implemented.
    #[must_use]
    pub fn has_supported_operation(&self) -> bool {
        self.info.is_supported() || self.read.is_supported() || self.write.is_supported()
    }
}

/// Map payload encoding definition.
///
/// The short name is what the CLI prints and accepts (e.g. `"lz4-block"`); the
/// long name describes the byte layout.
#[derive(Debug, Clone)]
pub struct Format {
    /// Short identifier (e.g., `"lz4-block"`).
    pub short_name: &'static str,
    /// Descriptive name of the layout for display purposes.
    pub long_name: &'static str,
    /// Operations supported for this encoding (info, read, write).
    pub capabilities: FormatCapabilities,
}

impl Format {
    /// Creates a new format definition with specified capabilities.
    #[must_use]
    pub const fn new(
        short_name: &'static str,
        long_name: &'static str,
        info: SupportStatus,
        read: SupportStatus,
        write: SupportStatus,
    ) -> Self {
        Self {
            short_name,
            long_name,
            capabilities: FormatCapabilities { info, read, write },
        }
    }
}

//! Common types and traits shared across `MapCodec` crates.
//!
//! This crate provides the abstractions that are shared between
//! `mapcodec-core` and the binaries built on it, keeping the retrieval seam
//! and the format capability model free of codec internals.

pub mod formats;
pub mod io;

// Re-export commonly used types
pub use formats::{Format, FormatCapabilities, SupportStatus};
pub use io::{ArtifactSource, RetrievalError};

// In: src/error.rs

//! This module defines the single, unified error type for the entire fpdc library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every variant describes a precondition violation detected *before* any byte
//! is written, or a decode region that ends before the cursor does. The codec
//! has no other recoverable states.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FpdcError {
    // =========================================================================
    // === Configuration Errors (detected before any processing)
    // =========================================================================
    #[error("Dimensionality must be at least 1, got {0}")]
    InvalidDimensionality(usize),

    #[error("Invalid chunk boundaries: {0}")]
    InvalidBoundaries(String),

    #[error("Invalid codec configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "Chunk {chunk} needs up to {required} bytes but its fixed-stride slot holds only {available}"
    )]
    LayoutOverlap {
        chunk: usize,
        required: usize,
        available: usize,
    },

    // =========================================================================
    // === Buffer Errors
    // =========================================================================
    #[error("Output buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    #[error("Offset table has {actual} entries but there are {expected} chunks")]
    OffsetTableMismatch { expected: usize, actual: usize },

    #[error("Trace length mismatch: boundaries cover {expected} elements, buffer holds {actual}")]
    TraceLengthMismatch { expected: usize, actual: usize },

    #[error("Compressed input truncated: need byte {needed}, only {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("Chunk {chunk} failed: {source}")]
    ChunkError {
        chunk: usize,
        #[source]
        source: Box<FpdcError>,
    },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, raised while reading a `CodecConfig`.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An error originating from the underlying I/O subsystem (config files, log files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dedicated rayon pool could not be built for `ExecutionMode::Parallel`.
    #[error("Thread pool construction failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FpdcError {
    /// Attaches the index of the chunk whose kernel produced this error.
    pub(crate) fn in_chunk(self, chunk: usize) -> Self {
        FpdcError::ChunkError {
            chunk,
            source: Box::new(self),
        }
    }
}

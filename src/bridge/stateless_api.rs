// In: src/bridge/stateless_api.rs

//! One-shot functions for callers that do not keep a `TraceCodec` around.
//!
//! Each call builds a default-configured codec (canonical lane width, global
//! rayon pool) with the given dimensionality and delegates to it.

use crate::bridge::codec::TraceCodec;
use crate::bridge::format::{CompressedTrace, CompressionStats};
use crate::chunk_pipeline::ChunkBoundaries;
use crate::config::CodecConfig;
use crate::error::FpdcError;

/// Compresses `trace` with `dimensionality` interleaved channels, split at `bounds`.
pub fn compress(
    trace: &[u64],
    dimensionality: usize,
    bounds: &ChunkBoundaries,
) -> Result<CompressedTrace, FpdcError> {
    TraceCodec::new(CodecConfig::with_dimensionality(dimensionality))?.compress(trace, bounds)
}

/// Inverse of [`compress`]; returns `bounds.trace_len()` words.
pub fn decompress(
    bytes: &[u8],
    dimensionality: usize,
    bounds: &ChunkBoundaries,
) -> Result<Vec<u64>, FpdcError> {
    TraceCodec::new(CodecConfig::with_dimensionality(dimensionality))?.decompress(bytes, bounds)
}

/// Compresses and summarises without keeping the stream.
pub fn analyze_trace(
    trace: &[u64],
    dimensionality: usize,
    bounds: &ChunkBoundaries,
) -> Result<CompressionStats, FpdcError> {
    Ok(compress(trace, dimensionality, bounds)?.stats())
}

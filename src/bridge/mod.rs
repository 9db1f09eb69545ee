// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the fpdc library. It wraps the
// `chunk_pipeline` engine in a small, stable surface.
//
// Data Flow (Compression):
//
//   1. [Stateful Facade (TraceCodec)]        -> Receives `&[u64]` / `&[f64]` + boundaries
//         |
//         `-> validates config, owns the executor
//
//   2. [Pipeline Engine (chunk_pipeline::orchestrator)] -> layout + one kernel per chunk
//         |
//         `-> Returns `CompressedTrace` (stream + offset table)
//
// Data Flow (Decompression):
//
//   1. [Stateful Facade (TraceCodec)]        -> Receives `&[u8]` + the same boundaries
//
//   2. [Pipeline Engine (chunk_pipeline::orchestrator)] -> Returns the original words
//
// The stateless functions build a default codec per call.
// ====================================================================================
pub mod codec;
pub mod format;
pub mod stateless_api;

pub use codec::TraceCodec;
pub use format::{CompressedTrace, CompressionStats};
pub use stateless_api::{analyze_trace, compress, decompress};

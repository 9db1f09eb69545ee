//! This file is the root of the `fpdc` Rust crate: a lossless, chunk-parallel
//! delta codec for interleaved 64-bit floating-point traces.
//!
//! A trace holds D channels sampled round-robin. Each chunk of the trace is
//! walked by a group of W lanes; every element is stored as the difference to
//! the most recent sample of its own channel, as a 4-bit header plus 0–8
//! payload bytes. Chunks are independent and are compressed in parallel into
//! fixed-stride slots of one output buffer.
//!
//! ```
//! use fpdc::{ChunkBoundaries, CodecConfig, TraceCodec};
//!
//! let samples: Vec<f64> = (0..300).map(|i| (i % 3) as f64 * 1.5).collect();
//! let codec = TraceCodec::new(CodecConfig::with_dimensionality(3)).unwrap();
//! let bounds = ChunkBoundaries::new(vec![128, 256, 300]).unwrap();
//!
//! let compressed = codec.compress_f64(&samples, &bounds).unwrap();
//! let restored = codec.decompress_f64(compressed.as_bytes(), &bounds).unwrap();
//! assert_eq!(restored, samples);
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
pub mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod chunk_pipeline;
pub mod config;
pub mod error;
pub mod kernels;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{analyze_trace, compress, decompress, CompressedTrace, CompressionStats, TraceCodec};
pub use chunk_pipeline::{Chunk, ChunkBoundaries};
pub use config::{CodecConfig, ExecutionMode};
pub use error::FpdcError;
pub use kernels::WARP_SIZE;
pub use observability::enable_verbose_logging;

//! This module collects the pure, stateless kernels of the codec.
//!
//! The kernels know nothing about chunk boundaries, output layout or
//! threading: each one maps a single chunk (a `&[u64]`) to a single
//! region-relative byte slice and back. The `chunk_pipeline` decides where
//! those regions live and which thread runs them.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Lane-group building blocks
pub mod header;
pub mod lane_group;
pub mod scan;

/// Chunk kernels
pub mod decode;
pub mod encode;

/// Sample <-> word conversion
pub mod bitcast;

//==================================================================================
// 2. Re-exports
//==================================================================================

pub use decode::decode_chunk;
pub use encode::{encode_chunk, max_chunk_bytes, worst_case_bytes};
pub use lane_group::WARP_SIZE;

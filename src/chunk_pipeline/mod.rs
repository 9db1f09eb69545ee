//! The chunk pipeline: everything between a whole trace and the per-chunk
//! kernels.
//!
//! Data flow (compression):
//!
//!   1. [partitioner]  -> `ChunkBoundaries` (caller-supplied or uniform)
//!   2. [layout]       -> fixed-stride byte slot per chunk
//!   3. [orchestrator] -> one `encode_chunk` job per slot, run on rayon
//!
//! Decompression walks the same three steps with `decode_chunk`.

pub mod layout;
pub mod orchestrator;
pub mod partitioner;

pub use layout::{chunk_base, StridedLayout};
pub use orchestrator::Executor;
pub use partitioner::{Chunk, ChunkBoundaries};

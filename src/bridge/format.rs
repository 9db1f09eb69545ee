// In: src/bridge/format.rs

//! The compressed-trace result type and its analysis summary.
//!
//! The byte stream is not self-describing: the lane width, dimensionality and
//! chunk boundaries are out-of-band parameters the caller must keep alongside
//! the bytes. `CompressedTrace` carries the offset table so callers can locate
//! and store each chunk independently.

use serde::Serialize;

/// Output of a compression call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedTrace {
    pub(crate) bytes: Vec<u8>,
    pub(crate) offsets: Vec<usize>,
    pub(crate) bases: Vec<usize>,
    pub(crate) elements: usize,
    pub(crate) header_bytes: usize,
}

impl CompressedTrace {
    /// The fixed-stride byte stream, ending at the last chunk's final offset.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// One entry per chunk: the absolute byte position just past the chunk.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.offsets.len()
    }

    /// The encoded bytes of chunk `index`, from its stride base to its offset.
    pub fn chunk_bytes(&self, index: usize) -> Option<&[u8]> {
        let beg = *self.bases.get(index)?;
        let end = *self.offsets.get(index)?;
        self.bytes.get(beg..end)
    }

    /// Summarises header, payload and total sizes.
    pub fn stats(&self) -> CompressionStats {
        let compressed_size: usize = self
            .bases
            .iter()
            .zip(&self.offsets)
            .map(|(base, end)| end - base)
            .sum();
        let original_size = self.elements * std::mem::size_of::<u64>();
        CompressionStats {
            chunks: self.chunk_count(),
            elements: self.elements,
            original_size,
            header_bytes: self.header_bytes,
            payload_bytes: compressed_size - self.header_bytes,
            compressed_size,
            stream_size: self.bytes.len(),
            ratio: if compressed_size == 0 {
                0.0
            } else {
                original_size as f64 / compressed_size as f64
            },
        }
    }
}

/// The public-facing struct for compression analysis results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionStats {
    pub chunks: usize,
    pub elements: usize,
    /// `elements * 8`.
    pub original_size: usize,
    /// Header blocks, `W/2` bytes per subchunk.
    pub header_bytes: usize,
    pub payload_bytes: usize,
    /// Bytes actually written across all chunks (headers plus payload).
    pub compressed_size: usize,
    /// Length of the fixed-stride stream including the gaps between chunks.
    pub stream_size: usize,
    /// `original_size / compressed_size`.
    pub ratio: f64,
}

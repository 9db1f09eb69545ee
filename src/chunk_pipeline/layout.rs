// In: src/chunk_pipeline/layout.rs

//! The fixed-stride output layout.
//!
//! Chunk `c` starting at element `start` is written at byte
//! `((start + 1) / 2) * 17` of the output buffer: eight payload bytes plus half
//! a header byte per element. The stride is part of the byte-stream format and
//! must not change. Because every chunk's position is known up front, chunks
//! can be compressed in parallel into disjoint slices with no coordination.
//!
//! A chunk's slot runs from its base to the next chunk's base. A non-final
//! chunk whose worst-case size does not fit its slot would overwrite its
//! neighbour, so such boundary lists are rejected before anything is written.
//! The final chunk's slot is sized by [`max_chunk_bytes`], which charges a
//! partial tail subchunk as a full lane group.

use crate::chunk_pipeline::partitioner::ChunkBoundaries;
use crate::error::FpdcError;
use crate::kernels::encode::{max_chunk_bytes, worst_case_bytes};

pub const STRIDE_NUMERATOR: usize = 17;
pub const STRIDE_DENOMINATOR: usize = 2;

/// Byte offset at which a chunk starting at element `start` begins.
#[inline]
pub fn chunk_base(start: usize) -> usize {
    (start + 1) / STRIDE_DENOMINATOR * STRIDE_NUMERATOR
}

/// Resolved byte slots for a validated set of chunk boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StridedLayout {
    bases: Vec<usize>,
    slots: Vec<usize>,
    capacity: usize,
}

impl StridedLayout {
    /// Resolves the slot of every chunk for lane width `W`.
    pub fn new<const W: usize>(bounds: &ChunkBoundaries) -> Result<Self, FpdcError> {
        let count = bounds.chunk_count();
        let mut bases = Vec::with_capacity(count);
        let mut slots = Vec::with_capacity(count);
        let mut capacity = 0;

        for chunk in bounds.chunks() {
            let base = chunk_base(chunk.start);
            let slot = if chunk.index + 1 == count {
                max_chunk_bytes::<W>(chunk.len())
            } else {
                let required = worst_case_bytes::<W>(chunk.len());
                let available = chunk_base(chunk.term) - base;
                if required > available {
                    return Err(FpdcError::LayoutOverlap {
                        chunk: chunk.index,
                        required,
                        available,
                    });
                }
                available
            };
            bases.push(base);
            slots.push(slot);
            capacity = base + slot;
        }

        Ok(Self {
            bases,
            slots,
            capacity,
        })
    }

    /// Minimum output buffer size for these boundaries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn bases(&self) -> &[usize] {
        &self.bases
    }

    /// Splits `buf` into one disjoint mutable slot per chunk.
    ///
    /// `buf` must be at least [`StridedLayout::capacity`] bytes long.
    pub fn split_mut<'a>(&self, buf: &'a mut [u8]) -> Result<Vec<&'a mut [u8]>, FpdcError> {
        if buf.len() < self.capacity {
            return Err(FpdcError::BufferTooSmall {
                required: self.capacity,
                actual: buf.len(),
            });
        }
        let mut rest = buf;
        let mut regions = Vec::with_capacity(self.slots.len());
        for &slot in &self.slots {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(slot);
            regions.push(head);
            rest = tail;
        }
        Ok(regions)
    }

    /// Read-only slots over compressed input. Input persisted only up to the
    /// last offset is shorter than the capacity, so slots are clipped to
    /// whatever bytes exist.
    pub fn split<'a>(&self, input: &'a [u8]) -> Vec<&'a [u8]> {
        self.bases
            .iter()
            .zip(&self.slots)
            .map(|(&base, &slot)| {
                let beg = base.min(input.len());
                let end = (base + slot).min(input.len());
                &input[beg..end]
            })
            .collect()
    }
}

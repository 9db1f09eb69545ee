// In: src/chunk_pipeline/partitioner.rs

//! Chunk boundaries: validation of caller-supplied cut points and a default
//! uniform partitioner.
//!
//! A boundary list holds the exclusive end of every chunk. Chunk 0 starts at 0,
//! chunk `c` starts where chunk `c - 1` ends, and the last entry is the trace
//! length. The first chunk must be non-empty; later chunks may be empty.

use std::ops::Range;

use crate::error::FpdcError;

/// One chunk of the trace, `[start, term)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub term: usize,
}

impl Chunk {
    #[inline]
    pub fn len(&self) -> usize {
        self.term - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term == self.start
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.term
    }
}

/// A validated, non-decreasing list of chunk end indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkBoundaries {
    cuts: Vec<usize>,
}

impl ChunkBoundaries {
    /// Validates `cuts`. The covered trace length is the last entry (0 when
    /// `cuts` is empty).
    pub fn new(cuts: Vec<usize>) -> Result<Self, FpdcError> {
        if let Some(&first) = cuts.first() {
            if first == 0 {
                return Err(FpdcError::InvalidBoundaries(
                    "first boundary must be greater than 0".to_string(),
                ));
            }
        }
        if let Some(pos) = cuts.windows(2).position(|w| w[1] < w[0]) {
            return Err(FpdcError::InvalidBoundaries(format!(
                "boundary {} ({}) is smaller than boundary {} ({})",
                pos + 1,
                cuts[pos + 1],
                pos,
                cuts[pos]
            )));
        }
        Ok(Self { cuts })
    }

    /// Splits `trace_len` elements into chunks of `chunk_size` elements,
    /// rounded up to a multiple of `lane_width`. Only the last chunk may be
    /// shorter, which keeps every chunk inside its fixed-stride slot.
    pub fn uniform(
        trace_len: usize,
        chunk_size: usize,
        lane_width: usize,
    ) -> Result<Self, FpdcError> {
        if chunk_size == 0 {
            return Err(FpdcError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if lane_width == 0 {
            return Err(FpdcError::InvalidConfig(
                "lane width must be at least 1".to_string(),
            ));
        }
        let step = chunk_size.div_ceil(lane_width) * lane_width;
        let mut cuts: Vec<usize> = (step..trace_len).step_by(step).collect();
        if trace_len > 0 {
            cuts.push(trace_len);
        }
        Ok(Self { cuts })
    }

    /// Fails unless these boundaries cover exactly `trace_len` elements.
    pub fn ensure_covers(&self, trace_len: usize) -> Result<(), FpdcError> {
        if self.trace_len() != trace_len {
            return Err(FpdcError::InvalidBoundaries(format!(
                "boundaries cover {} elements but the trace has {}",
                self.trace_len(),
                trace_len
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn trace_len(&self) -> usize {
        self.cuts.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.cuts.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.cuts
    }

    pub fn chunk(&self, index: usize) -> Option<Chunk> {
        let term = *self.cuts.get(index)?;
        let start = if index == 0 { 0 } else { self.cuts[index - 1] };
        Some(Chunk { index, start, term })
    }

    pub fn chunks(&self) -> impl Iterator<Item = Chunk> + '_ {
        self.cuts.iter().enumerate().map(|(index, &term)| Chunk {
            index,
            start: if index == 0 { 0 } else { self.cuts[index - 1] },
            term,
        })
    }
}

impl TryFrom<Vec<usize>> for ChunkBoundaries {
    type Error = FpdcError;

    fn try_from(cuts: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(cuts)
    }
}

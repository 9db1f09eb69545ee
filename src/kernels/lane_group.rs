//! The lane-group abstraction: W cooperating lanes that walk one chunk a
//! subchunk at a time.
//!
//! Each lane owns a prediction register. After a subchunk starting at
//! chunk-relative index `s`, lane `l` loads the element at
//! `s + W - D + (l mod D)`. That is the most recent element of the channel
//! lane `l` will see in the next subchunk, so deltas are taken against the
//! same channel rather than the previous sample.

use crate::kernels::scan::LaneScan;

/// Canonical lane-group width.
pub const WARP_SIZE: usize = 32;

/// Per-chunk lane state shared by the encoder and decoder.
#[derive(Debug, Clone)]
pub struct LaneGroup<const W: usize> {
    /// `W + lane mod D`, the lookback index before subtracting `D`.
    reach: [usize; W],
    dimensionality: usize,
    /// Prediction register per lane.
    prev: [u64; W],
    pub(crate) scan: LaneScan<W>,
}

impl<const W: usize> LaneGroup<W> {
    /// Header bytes per subchunk.
    pub const HEADER_BYTES: usize = W / 2;
    /// Largest possible subchunk: full header block plus eight bytes per lane.
    pub const MAX_SUBCHUNK_BYTES: usize = W / 2 + 8 * W;

    const VALID_WIDTH: () = assert!(
        W >= 2 && W.is_power_of_two() && W <= 1 << 16,
        "lane width must be a power of two between 2 and 65536"
    );

    /// Builds a fresh group for one chunk. All predictions start at 0.
    pub fn new(dimensionality: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;

        let mut reach = [0usize; W];
        for (lane, r) in reach.iter_mut().enumerate() {
            *r = W + lane % dimensionality;
        }
        Self {
            reach,
            dimensionality,
            prev: [0; W],
            scan: LaneScan::new(),
        }
    }

    #[inline]
    pub fn prediction(&self, lane: usize) -> u64 {
        self.prev[lane]
    }

    /// Chunk-relative index lane `lane` predicts from after the subchunk at
    /// `subchunk_start`, or `None` when that index falls before the chunk.
    #[inline]
    pub fn lookback(&self, lane: usize, subchunk_start: usize) -> Option<usize> {
        (subchunk_start + self.reach[lane]).checked_sub(self.dimensionality)
    }

    /// Loads every lane's prediction for the subchunk after the one starting at
    /// `subchunk_start`. Lookbacks that fall before the chunk start predict 0,
    /// which only happens when the dimensionality exceeds the lane width.
    pub fn advance(&mut self, chunk: &[u64], subchunk_start: usize) {
        for lane in 0..W {
            self.prev[lane] = self.lookback(lane, subchunk_start).map_or(0, |idx| chunk[idx]);
        }
    }
}

/// Number of subchunks needed for `len` elements.
#[inline]
pub fn subchunk_count(len: usize, width: usize) -> usize {
    len.div_ceil(width)
}

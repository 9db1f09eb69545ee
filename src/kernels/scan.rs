//! This module contains the lane-group prefix-sum primitive shared by the
//! encoder and the decoder.
//!
//! Each lane contributes a payload byte count; the scan turns those counts into
//! per-lane byte offsets inside a subchunk. The algorithm is a Hillis–Steele
//! inclusive scan: `log2(W)` rounds, round `k` adds the value held `2^k` lanes
//! below. The working buffer is `W + W/2` slots wide and its lower `W/2` slots
//! stay zero, so the largest lookback (`W/2`) lands in padding instead of
//! needing a bounds check.

//==================================================================================
// 1. The Scan Buffer
//==================================================================================

/// A per-invocation scan buffer for one lane group of width `W`.
///
/// Create one per chunk and call [`LaneScan::run`] once per subchunk; the
/// buffer is fully re-initialised on every run and carries no state between
/// subchunks.
#[derive(Debug, Clone)]
pub struct LaneScan<const W: usize> {
    slots: Vec<u32>,
}

impl<const W: usize> LaneScan<W> {
    /// Number of zero slots below lane 0.
    const PAD: usize = W / 2;

    pub fn new() -> Self {
        Self {
            slots: vec![0; W + W / 2],
        }
    }

    /// Runs the inclusive scan over `counts`, one entry per lane.
    ///
    /// Lanes are visited from high to low inside a round, so every addition
    /// reads the value its source lane held at the end of the previous round.
    /// This is the sequential equivalent of the barrier that separates rounds
    /// on lock-step hardware.
    pub fn run(&mut self, counts: &[u32; W]) {
        let lanes = &mut self.slots[Self::PAD..];
        lanes.copy_from_slice(counts);

        let mut stride = 1;
        while stride < W {
            for lane in (0..W).rev() {
                let idx = Self::PAD + lane;
                self.slots[idx] += self.slots[idx - stride];
            }
            stride <<= 1;
        }
    }

    /// Sum of the counts of lanes `0..=lane`.
    #[inline]
    pub fn inclusive(&self, lane: usize) -> usize {
        self.slots[Self::PAD + lane] as usize
    }

    /// Sum of the counts of lanes `0..lane`; lane 0 reads the zero padding.
    #[inline]
    pub fn exclusive(&self, lane: usize) -> usize {
        self.slots[Self::PAD + lane - 1] as usize
    }

    /// Sum over the whole group, read from the last slot.
    #[inline]
    pub fn total(&self) -> usize {
        self.slots[Self::PAD + W - 1] as usize
    }
}

impl<const W: usize> Default for LaneScan<W> {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_small_group() {
        let mut scan = LaneScan::<4>::new();
        scan.run(&[8, 0, 3, 1]);

        assert_eq!(
            (0..4).map(|l| scan.inclusive(l)).collect::<Vec<_>>(),
            vec![8, 8, 11, 12]
        );
        assert_eq!(
            (0..4).map(|l| scan.exclusive(l)).collect::<Vec<_>>(),
            vec![0, 8, 8, 11]
        );
        assert_eq!(scan.total(), 12);
    }

    #[test]
    fn test_scan_matches_running_sum_for_full_warp() {
        let mut counts = [0u32; 32];
        for (lane, c) in counts.iter_mut().enumerate() {
            *c = ((lane * 7 + 3) % 9) as u32;
        }

        let mut scan = LaneScan::<32>::new();
        scan.run(&counts);

        let mut running = 0usize;
        for lane in 0..32 {
            assert_eq!(scan.exclusive(lane), running, "exclusive lane {}", lane);
            running += counts[lane] as usize;
            assert_eq!(scan.inclusive(lane), running, "inclusive lane {}", lane);
        }
        assert_eq!(scan.total(), running);
    }

    #[test]
    fn test_scan_reinitialises_between_runs() {
        let mut scan = LaneScan::<8>::new();
        scan.run(&[8; 8]);
        assert_eq!(scan.total(), 64);

        scan.run(&[0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(scan.exclusive(0), 0);
        assert_eq!(scan.exclusive(4), 1);
        assert_eq!(scan.total(), 1);
    }

    #[test]
    fn test_scan_two_lane_group() {
        let mut scan = LaneScan::<2>::new();
        scan.run(&[5, 3]);
        assert_eq!(scan.exclusive(0), 0);
        assert_eq!(scan.exclusive(1), 5);
        assert_eq!(scan.total(), 8);
    }
}

//! The per-chunk compression kernel.
//!
//! For every subchunk the kernel writes a `W/2`-byte header block followed by
//! the payload bytes of all lanes, packed back to back in lane order. Payload
//! positions come from the lane-group scan over the per-lane byte counts.
//!
//! The kernel works in region-relative coordinates: `out` starts at the chunk's
//! layout base and the returned length is added to that base by the caller.

use crate::error::FpdcError;
use crate::kernels::header::{pack_pair, Header};
use crate::kernels::lane_group::{subchunk_count, LaneGroup};

/// Buffer size reserved for a chunk of `len` elements: every subchunk,
/// including a partial tail, is charged a full lane group.
#[inline]
pub fn max_chunk_bytes<const W: usize>(len: usize) -> usize {
    subchunk_count(len, W) * LaneGroup::<W>::MAX_SUBCHUNK_BYTES
}

/// Largest size the kernel can actually write for `len` elements. Inactive
/// tail lanes only cost their header nibble.
#[inline]
pub fn worst_case_bytes<const W: usize>(len: usize) -> usize {
    subchunk_count(len, W) * LaneGroup::<W>::HEADER_BYTES + 8 * len
}

/// Compresses one chunk into `out` and returns the number of bytes written.
///
/// `out` must hold at least [`worst_case_bytes`] bytes for `chunk.len()`
/// elements; the check happens before anything is written.
pub fn encode_chunk<const W: usize>(
    chunk: &[u64],
    dimensionality: usize,
    out: &mut [u8],
) -> Result<usize, FpdcError> {
    let required = worst_case_bytes::<W>(chunk.len());
    if out.len() < required {
        return Err(FpdcError::BufferTooSmall {
            required,
            actual: out.len(),
        });
    }

    let mut group = LaneGroup::<W>::new(dimensionality);
    let mut headers = [Header::default(); W];
    let mut magnitudes = [0u64; W];
    let mut counts = [0u32; W];
    let mut off = 0usize;

    let mut start = 0;
    while start < chunk.len() {
        let active = (chunk.len() - start).min(W);

        // 1. Delta against the lane's prediction, sign-folded.
        for lane in 0..W {
            if lane < active {
                let diff = chunk[start + lane].wrapping_sub(group.prediction(lane));
                let (header, magnitude) = Header::for_delta(diff);
                headers[lane] = header;
                magnitudes[lane] = magnitude;
                counts[lane] = header.byte_count() as u32;
            } else {
                headers[lane] = Header::default();
                magnitudes[lane] = 0;
                counts[lane] = 0;
            }
        }

        // 2. Payload start positions.
        group.scan.run(&counts);

        // 3. Payload bytes, low byte first.
        let payload_base = off + LaneGroup::<W>::HEADER_BYTES;
        for lane in 0..active {
            let len = counts[lane] as usize;
            let beg = payload_base + group.scan.exclusive(lane);
            out[beg..beg + len].copy_from_slice(&magnitudes[lane].to_le_bytes()[..len]);
        }

        // 4. Header block, two nibbles per byte.
        for (pair, slot) in out[off..payload_base].iter_mut().enumerate() {
            *slot = pack_pair(headers[2 * pair], headers[2 * pair + 1]);
        }

        off = payload_base + group.scan.total();

        if start + W < chunk.len() {
            group.advance(chunk, start);
        }
        start += W;
    }

    Ok(off)
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u64 = 0x3FF0_0000_0000_0000;

    #[test]
    fn test_repeated_value_collapses_after_first_subchunk() {
        // D = 1, W = 4: the first subchunk predicts 0, the second predicts the
        // last element of the first.
        let chunk = vec![ONE; 8];
        let mut out = vec![0u8; max_chunk_bytes::<4>(chunk.len())];

        let written = encode_chunk::<4>(&chunk, 1, &mut out).unwrap();

        assert_eq!(written, 2 + 4 * 8 + 2);
        // Four positive 8-byte deltas: code 7 in every nibble.
        assert_eq!(&out[0..2], &[0x77, 0x77]);
        for lane in 0..4 {
            let beg = 2 + lane * 8;
            assert_eq!(&out[beg..beg + 8], &ONE.to_le_bytes());
        }
        // Header-only second subchunk.
        assert_eq!(&out[34..36], &[0x00, 0x00]);
    }

    #[test]
    fn test_two_byte_delta_is_stored_in_three() {
        let chunk = vec![0x1234u64];
        let mut out = vec![0u8; max_chunk_bytes::<2>(1)];

        let written = encode_chunk::<2>(&chunk, 1, &mut out).unwrap();

        assert_eq!(written, 1 + 3);
        assert_eq!(out[0] & 0x0F, 2);
        assert_eq!(&out[1..4], &[0x34, 0x12, 0x00]);
    }

    #[test]
    fn test_negative_delta_sets_sign_bit() {
        // Second subchunk: 5 predicted from 9 -> delta -4.
        let chunk = vec![9u64, 9, 5, 9];
        let mut out = vec![0u8; max_chunk_bytes::<2>(chunk.len())];

        let written = encode_chunk::<2>(&chunk, 1, &mut out).unwrap();

        // [hdr][9][9] [hdr][4]
        assert_eq!(written, 1 + 2 + 1 + 1);
        assert_eq!(out[0], 0x11);
        assert_eq!(out[3], 0b1001);
        assert_eq!(out[4], 4);
    }

    #[test]
    fn test_partial_tail_pads_headers() {
        let chunk = vec![1u64, 2, 3];
        let mut out = vec![0xEEu8; max_chunk_bytes::<4>(chunk.len())];

        let written = encode_chunk::<4>(&chunk, 1, &mut out).unwrap();

        assert_eq!(written, 2 + 3);
        assert_eq!(&out[0..2], &[0x11, 0x01]);
        assert_eq!(&out[2..5], &[1, 2, 3]);
    }

    #[test]
    fn test_undersized_region_is_rejected() {
        let chunk = vec![ONE; 4];
        let mut out = vec![0u8; 10];
        let result = encode_chunk::<4>(&chunk, 1, &mut out);
        assert!(matches!(
            result,
            Err(FpdcError::BufferTooSmall { required: 34, actual: 10 })
        ));
    }

    #[test]
    fn test_partial_tail_fits_tight_region() {
        let chunk: Vec<u64> = (0..29).map(|i| u64::MAX - i).collect();
        let mut out = vec![0u8; worst_case_bytes::<32>(chunk.len())];
        assert_eq!(out.len(), 16 + 29 * 8);
        assert!(out.len() < max_chunk_bytes::<32>(chunk.len()));

        let written = encode_chunk::<32>(&chunk, 1, &mut out).unwrap();

        assert_eq!(written, 16 + 29 * 8);
        assert!(matches!(
            encode_chunk::<32>(&chunk, 1, &mut out[..written - 1]),
            Err(FpdcError::BufferTooSmall { required: 248, actual: 247 })
        ));
    }

    #[test]
    fn test_empty_chunk_writes_nothing() {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(encode_chunk::<32>(&[], 4, &mut out).unwrap(), 0);
    }
}

//! The per-chunk decompression kernel, the exact mirror of `encode`.
//!
//! The cursor arithmetic is identical to the encoder's, so a region produced by
//! `encode_chunk` with the same dimensionality and lane width decodes back to
//! the original words. Every read is checked against the region length; a
//! region that ends early is reported as `TruncatedInput`.

use crate::error::FpdcError;
use crate::kernels::header::{unpack_pair, Header};
use crate::kernels::lane_group::LaneGroup;

/// Decompresses one chunk from `input` into `chunk`, returning the number of
/// bytes consumed.
///
/// `chunk.len()` fixes how many elements are decoded. `input` starts at the
/// chunk's layout base and may extend past the chunk's last byte.
pub fn decode_chunk<const W: usize>(
    input: &[u8],
    dimensionality: usize,
    chunk: &mut [u64],
) -> Result<usize, FpdcError> {
    let mut group = LaneGroup::<W>::new(dimensionality);
    let mut headers = [Header::default(); W];
    let mut counts = [0u32; W];
    let mut off = 0usize;

    let mut start = 0;
    while start < chunk.len() {
        let active = (chunk.len() - start).min(W);

        // 1. Header block: scatter both nibbles of each byte to their lanes.
        let payload_base = off + LaneGroup::<W>::HEADER_BYTES;
        let block = read(input, off, payload_base)?;
        for (pair, &byte) in block.iter().enumerate() {
            let (even, odd) = unpack_pair(byte);
            headers[2 * pair] = even;
            headers[2 * pair + 1] = odd;
        }
        for lane in 0..W {
            counts[lane] = if lane < active {
                headers[lane].byte_count() as u32
            } else {
                0
            };
        }

        // 2. Payload start positions.
        group.scan.run(&counts);

        // 3. Rebuild each delta from its bytes, highest address first.
        for lane in 0..active {
            let beg = payload_base + group.scan.exclusive(lane);
            let bytes = read(input, beg, beg + counts[lane] as usize)?;
            let mut diff = bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64);
            if headers[lane].negative {
                diff = diff.wrapping_neg();
            }
            chunk[start + lane] = group.prediction(lane).wrapping_add(diff);
        }

        off = payload_base + group.scan.total();

        if start + W < chunk.len() {
            group.advance(chunk, start);
        }
        start += W;
    }

    Ok(off)
}

#[inline]
fn read(input: &[u8], beg: usize, end: usize) -> Result<&[u8], FpdcError> {
    input.get(beg..end).ok_or(FpdcError::TruncatedInput {
        needed: end,
        available: input.len(),
    })
}

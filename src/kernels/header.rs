//! The 4-bit per-element header: one sign bit and a 3-bit byte-count code.
//!
//! Payloads are 0, 1, 3, 4, 5, 6, 7 or 8 bytes long. A delta that would need
//! exactly two bytes is widened to three, which leaves eight payload sizes and
//! lets the code fit in three bits:
//!
//! | byte count | 0 | 1 | 3 | 4 | 5 | 6 | 7 | 8 |
//! |------------|---|---|---|---|---|---|---|---|
//! | code       | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 |
//!
//! Two headers share a byte: the even lane in the low nibble, the odd lane in
//! the high nibble.

const SIGN_BIT: u8 = 0b1000;
const CODE_MASK: u8 = 0b0111;

/// A decoded header nibble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// The stored payload is the magnitude of a negative delta.
    pub negative: bool,
    /// Byte-count code, `0..=7`.
    pub code: u8,
}

impl Header {
    /// Splits a wrapped difference into its header and the magnitude to store.
    ///
    /// A difference with the top bit set is treated as negative and replaced by
    /// its two's-complement negation.
    pub fn for_delta(diff: u64) -> (Self, u64) {
        let negative = diff >> 63 == 1;
        let magnitude = if negative { diff.wrapping_neg() } else { diff };
        let header = Header {
            negative,
            code: code_for_byte_count(payload_len(magnitude)),
        };
        (header, magnitude)
    }

    /// Number of payload bytes this header announces.
    #[inline]
    pub fn byte_count(self) -> usize {
        byte_count_for_code(self.code)
    }

    #[inline]
    pub fn to_nibble(self) -> u8 {
        (if self.negative { SIGN_BIT } else { 0 }) | (self.code & CODE_MASK)
    }

    /// Reads the low four bits of `nibble`; anything above is ignored.
    #[inline]
    pub fn from_nibble(nibble: u8) -> Self {
        Header {
            negative: nibble & SIGN_BIT != 0,
            code: nibble & CODE_MASK,
        }
    }
}

/// Payload length for `magnitude` after the two-to-three byte widening.
#[inline]
pub fn payload_len(magnitude: u64) -> usize {
    let significant = 8 - (magnitude.leading_zeros() as usize >> 3);
    if significant == 2 {
        3
    } else {
        significant
    }
}

#[inline]
fn code_for_byte_count(byte_count: usize) -> u8 {
    debug_assert!(byte_count != 2 && byte_count <= 8);
    if byte_count >= 3 {
        (byte_count - 1) as u8
    } else {
        byte_count as u8
    }
}

#[inline]
fn byte_count_for_code(code: u8) -> usize {
    let code = (code & CODE_MASK) as usize;
    if code < 2 {
        code
    } else {
        code + 1
    }
}

/// Packs the headers of an even/odd lane pair into one byte.
#[inline]
pub fn pack_pair(even: Header, odd: Header) -> u8 {
    even.to_nibble() | (odd.to_nibble() << 4)
}

/// Inverse of [`pack_pair`].
#[inline]
pub fn unpack_pair(byte: u8) -> (Header, Header) {
    (Header::from_nibble(byte), Header::from_nibble(byte >> 4))
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_len_widens_two_byte_deltas() {
        assert_eq!(payload_len(0), 0);
        assert_eq!(payload_len(0xFF), 1);
        assert_eq!(payload_len(0x100), 3);
        assert_eq!(payload_len(0xFFFF), 3);
        assert_eq!(payload_len(0x1_0000), 3);
        assert_eq!(payload_len(0x100_0000), 4);
        assert_eq!(payload_len(u64::MAX), 8);
    }

    #[test]
    fn test_code_table() {
        let expected = [(0, 0), (1, 1), (3, 2), (4, 3), (5, 4), (6, 5), (7, 6), (8, 7)];
        for (count, code) in expected {
            assert_eq!(code_for_byte_count(count), code);
            assert_eq!(byte_count_for_code(code), count);
        }
        // No code ever announces a two-byte payload.
        assert!((0..8u8).all(|c| byte_count_for_code(c) != 2));
    }

    #[test]
    fn test_for_delta_negative() {
        // prev = 10, value = 7 -> wrapped diff is -3
        let diff = 7u64.wrapping_sub(10);
        let (header, magnitude) = Header::for_delta(diff);
        assert!(header.negative);
        assert_eq!(magnitude, 3);
        assert_eq!(header.byte_count(), 1);
        assert_eq!(header.to_nibble(), 0b1001);
    }

    #[test]
    fn test_for_delta_min_value_stays_eight_bytes() {
        let (header, magnitude) = Header::for_delta(1 << 63);
        assert!(header.negative);
        assert_eq!(magnitude, 1 << 63);
        assert_eq!(header.byte_count(), 8);
    }

    #[test]
    fn test_pack_pair_layout() {
        let even = Header { negative: false, code: 7 };
        let odd = Header { negative: true, code: 2 };
        let byte = pack_pair(even, odd);
        assert_eq!(byte, 0xA7);
        assert_eq!(unpack_pair(byte), (even, odd));
    }
}

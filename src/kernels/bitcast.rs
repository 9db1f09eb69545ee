//! This module contains the pure, stateless bit-cast between `f64` samples and
//! the `u64` words the codec operates on.
//!
//! The codec never interprets a sample as a number, only as a bit pattern, so
//! NaN payloads, signed zeros and subnormals all survive unchanged. This module
//! relies on `bytemuck` for the zero-copy reinterpretation.

/// Reinterprets `f64` samples as their IEEE-754 bit patterns without copying.
#[inline]
pub fn samples_as_words(samples: &[f64]) -> &[u64] {
    bytemuck::cast_slice(samples)
}

/// Mutable view of a sample buffer as words, for decoding in place.
#[inline]
pub fn samples_as_words_mut(samples: &mut [f64]) -> &mut [u64] {
    bytemuck::cast_slice_mut(samples)
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcast_preserves_special_values() {
        let nan_with_payload = f64::from_bits(0x7FF8_0000_DEAD_BEEF);
        let samples = vec![1.0, -0.0, f64::MIN_POSITIVE / 2.0, nan_with_payload, f64::INFINITY];

        let words = samples_as_words(&samples);
        assert_eq!(words[0], 0x3FF0_0000_0000_0000);
        assert_eq!(words[1], 0x8000_0000_0000_0000);
        assert_eq!(words[3], 0x7FF8_0000_DEAD_BEEF);

        for (a, &w) in samples.iter().zip(words) {
            assert_eq!(a.to_bits(), w);
        }
    }

    #[test]
    fn test_bitcast_mut_view_writes_through() {
        let mut samples = vec![0.0f64; 2];
        samples_as_words_mut(&mut samples)[1] = 2.5f64.to_bits();
        assert_eq!(samples[1], 2.5);
    }
}

//! Utility functions for SLH-DSA.
//!
//! This module contains helper functions used throughout the SLH-DSA implementation,
//! including bit manipulation and encoding functions from FIPS 205.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Extract base-2^b representation from a byte array.
///
/// FIPS 205, Algorithm 3: base_2b(X, b, out_len)
///
/// Interprets X as a sequence of b-bit unsigned integers and extracts out_len of them.
///
/// # Arguments
/// * `x` - Input byte array
/// * `b` - Number of bits per output element
/// * `out_len` - Number of elements to extract
///
/// # Returns
/// Vector of extracted values, each in range [0, 2^b)
#[must_use]
pub fn base_2b(x: &[u8], b: usize, out_len: usize) -> Vec<u32> {
    debug_assert!(b > 0 && b <= 32);

    let mut result = Vec::with_capacity(out_len);
    let mask = (1u64 << b) - 1;

    // Accumulator for bits
    let mut bits: u64 = 0;
    let mut num_bits: usize = 0;
    let mut byte_idx: usize = 0;

    for _ in 0..out_len {
        // Load more bytes if needed
        while num_bits < b && byte_idx < x.len() {
            bits = (bits << 8) | u64::from(x[byte_idx]);
            num_bits += 8;
            byte_idx += 1;
        }

        // Extract b bits
        if num_bits >= b {
            num_bits -= b;
            result.push(((bits >> num_bits) & mask) as u32);
        } else {
            // Pad with zeros if not enough bits
            result.push(((bits << (b - num_bits)) & mask) as u32);
            num_bits = 0;
        }
    }

    result
}

/// Compute the checksum for WOTS+ message encoding.
///
/// csum = sum(w - 1 - msg[i]) for i in 0..len1
///
/// # Arguments
/// * `msg` - Base-w encoded message (len1 elements)
/// * `w` - Winternitz parameter (typically 16)
///
/// # Returns
/// Checksum value
#[must_use]
pub fn wots_checksum(msg: &[u32], w: u32) -> u32 {
    let mut csum: u32 = 0;
    for &m in msg {
        csum += w - 1 - m;
    }
    csum
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_base_2b_4bit() {
        // 0xAB = 1010_1011 -> [10, 11] in base 16 (4 bits)
        let result = base_2b(&[0xAB], 4, 2);
        assert_eq!(result, vec![0xA, 0xB]);
    }

    #[test]
    fn test_base_2b_8bit() {
        let result = base_2b(&[0x12, 0x34], 8, 2);
        assert_eq!(result, vec![0x12, 0x34]);
    }

    #[test]
    fn test_base_2b_pads_short_input() {
        // Two bytes only provide 16 bits; the fifth 4-bit digit is zero.
        let result = base_2b(&[0xAB, 0xCD], 4, 5);
        assert_eq!(result, vec![0xA, 0xB, 0xC, 0xD, 0x0]);
    }

    #[test]
    fn test_wots_checksum() {
        // For w=16, each msg[i] is in [0, 15]
        // If msg = [0, 0, 0, 0], csum = 4 * 15 = 60
        assert_eq!(wots_checksum(&[0, 0, 0, 0], 16), 60);

        // If msg = [15, 15, 15, 15], csum = 0
        assert_eq!(wots_checksum(&[15, 15, 15, 15], 16), 0);

        // If msg = [8, 8, 8, 8], csum = 4 * 7 = 28
        assert_eq!(wots_checksum(&[8, 8, 8, 8], 16), 28);
    }
}

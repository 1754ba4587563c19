//! WOTS+ (Winternitz One-Time Signature) message encoding and verification.
//!
//! WOTS+ is the one-time signature scheme used at every Merkle leaf of the
//! hypertree. This module holds the parts of it that work on public data:
//! the message-to-digit encoding shared by signer and verifier, and the
//! public-key recovery used during verification.
//!
//! Producing a WOTS+ signature is a different story here than in FIPS 205:
//! chain secrets come from the masked PRF tree and the chains advance
//! through the masked chain state, so the signing side lives with the
//! Merkle machinery in [`crate::merkle`].
//!
//! FIPS 205, Algorithms 5 and 8.

use crate::address::{Address, AdrsType};
use crate::hash::HashSuite;
use crate::params::common::{LG_W, W};
use crate::utils::{base_2b, wots_checksum};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Encode an n-byte message as `wots_len` base-w digits: the message split
/// into 4-bit digits followed by the checksum digits.
///
/// Digit `i` is the number of chain steps applied to chain `i` when
/// signing, which is why the signer needs this just as much as the
/// verifier does.
pub(crate) fn chain_lengths(message: &[u8], wots_len: usize, wots_len1: usize) -> Vec<u32> {
    let w = W as u32;

    let mut digits = base_2b(message, LG_W, wots_len1);

    let csum = wots_checksum(&digits, w);

    // Left-align the checksum to a digit boundary and split it.
    let len2 = wots_len - wots_len1;
    let csum_shifted = ((u64::from(csum)) << (8 - ((len2 * LG_W) % 8))) as u32;
    let csum_total_bits = len2 * LG_W;
    let csum_bytes_needed = csum_total_bits.div_ceil(8);

    let mut csum_buf = [0u8; 4];
    csum_buf[4 - csum_bytes_needed..]
        .copy_from_slice(&csum_shifted.to_be_bytes()[4 - csum_bytes_needed..]);
    let csum_digits = base_2b(&csum_buf[4 - csum_bytes_needed..], LG_W, len2);
    digits.extend(csum_digits);

    digits
}

/// Compute a single step of the WOTS+ chain.
///
/// FIPS 205, Algorithm 5: chain(X, i, s, PK.seed, ADRS)
///
/// Applies the chaining function F repeatedly s times, starting from input X
/// at chain position i.
///
/// # Arguments
/// * `x` - Starting value (n bytes)
/// * `i` - Starting index in the chain
/// * `s` - Number of steps to take
/// * `pk_seed` - Public seed
/// * `adrs` - Address (must have type WotsHash)
///
/// # Returns
/// Result after s chain applications
pub fn wots_chain<H: HashSuite>(
    x: &[u8],
    i: u32,
    s: u32,
    pk_seed: &[u8],
    adrs: &mut Address,
) -> Vec<u8> {
    if s == 0 {
        return x.to_vec();
    }

    let mut result = x.to_vec();

    for j in i..(i + s) {
        adrs.set_hash(j);
        result = H::f(pk_seed, adrs, &result);
    }

    result
}

/// Compute WOTS+ public key from signature.
///
/// FIPS 205, Algorithm 8: wots_PKFromSig(sig, M, PK.seed, ADRS)
///
/// Recovers the WOTS+ public key from a signature and message.
/// Used during verification.
///
/// # Arguments
/// * `sig` - WOTS+ signature (WOTS_LEN * n bytes)
/// * `message` - Original message (n bytes)
/// * `pk_seed` - Public seed
/// * `adrs` - Address (will be modified during computation)
///
/// # Returns
/// Recovered WOTS+ public key (n bytes)
pub fn wots_pk_from_sig<H: HashSuite, const WOTS_LEN: usize, const WOTS_LEN1: usize>(
    sig: &[u8],
    message: &[u8],
    pk_seed: &[u8],
    adrs: &mut Address,
) -> Vec<u8> {
    let w = W as u32;
    let n = H::N;

    let msg = chain_lengths(message, WOTS_LEN, WOTS_LEN1);

    // Compute wots_pk_adrs for public key compression
    let wots_pk_adrs = adrs.with_type(AdrsType::WotsPk);

    // Compute chain endpoints from signature
    let mut tmp = Vec::with_capacity(WOTS_LEN * n);

    for i in 0..WOTS_LEN {
        adrs.set_chain(i as u32);
        let sig_i = &sig[i * n..(i + 1) * n];
        let chain_end = wots_chain::<H>(sig_i, msg[i], w - 1 - msg[i], pk_seed, adrs);
        tmp.extend_from_slice(&chain_end);
    }

    // Compress to get public key
    H::t_l(pk_seed, &wots_pk_adrs, &tmp)
}

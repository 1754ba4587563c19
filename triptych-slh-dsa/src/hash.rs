//! Hash function abstraction for the unshared code paths.
//!
//! SLH-DSA uses several specialized hash functions for different purposes.
//! This module defines the `HashSuite` trait covering every hash that never
//! sees an unshared secret: message processing, tweakable hashing of public
//! values (`thash`), and the whole verifier.
//!
//! FIPS 205 defines the following hash functions:
//! - **PRFmsg**: Pseudorandom function for message randomization
//! - **Hmsg**: Hash function for message digest generation
//! - **F**: Chaining function for WOTS+
//! - **H**: Two-to-one hash function for Merkle trees
//! - **Tl**: Multi-input hash function for WOTS+ and FORS public key compression
//!
//! FIPS 205's `PRF` (flat secret-key derivation) has no counterpart here:
//! WOTS+ and FORS secrets come out of the masked PRF tree
//! (see [`crate::prf_tree`]) and never pass through an unshared hash.

use crate::address::Address;
use zeroize::Zeroizing;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Hash function suite trait for SLH-DSA.
///
/// Implementations of this trait provide the unshared hash functions
/// required for a specific SHAKE-based SLH-DSA variant.
pub trait HashSuite {
    /// Security parameter n (hash output length in bytes).
    /// - 16 for 128-bit security
    /// - 24 for 192-bit security
    /// - 32 for 256-bit security
    const N: usize;

    /// PRFmsg: Generate n-byte randomizer for message signing.
    ///
    /// FIPS 205, Section 10.1
    ///
    /// Used for: Generating the randomizer R in signature generation
    ///
    /// # Arguments
    /// * `sk_prf` - Secret PRF key (n bytes)
    /// * `opt_rand` - Optional randomness (n bytes, can be PK.seed for deterministic signing)
    /// * `message` - Message to sign
    ///
    /// # Returns
    /// n-byte randomizer wrapped in `Zeroizing` for automatic memory cleanup
    fn prf_msg(sk_prf: &[u8], opt_rand: &[u8], message: &[u8]) -> Zeroizing<Vec<u8>>;

    /// Hmsg: Generate message digest for FORS signing.
    ///
    /// FIPS 205, Section 10.1
    ///
    /// Used for: Generating the digest that determines FORS indices
    ///
    /// # Arguments
    /// * `r` - Randomizer (n bytes)
    /// * `pk_seed` - Public seed (n bytes)
    /// * `pk_root` - Public root (n bytes)
    /// * `message` - Message to sign
    /// * `out_len` - Required output length in bytes
    ///
    /// # Returns
    /// Message digest of specified length
    fn h_msg(r: &[u8], pk_seed: &[u8], pk_root: &[u8], message: &[u8], out_len: usize) -> Vec<u8>;

    /// F: Chaining function for WOTS+.
    ///
    /// FIPS 205, Section 10.1
    ///
    /// Used for: WOTS+ chain computation on the verifier path (the signer
    /// runs chains through the masked chain state instead)
    ///
    /// # Arguments
    /// * `pk_seed` - Public seed (n bytes)
    /// * `adrs` - Address structure for domain separation
    /// * `m1` - Input message (n bytes)
    ///
    /// # Returns
    /// n-byte hash output
    fn f(pk_seed: &[u8], adrs: &Address, m1: &[u8]) -> Vec<u8>;

    /// H: Two-to-one hash function.
    ///
    /// FIPS 205, Section 10.1
    ///
    /// Used for: Merkle tree node computation
    ///
    /// # Arguments
    /// * `pk_seed` - Public seed (n bytes)
    /// * `adrs` - Address structure for domain separation
    /// * `m1` - Left child (n bytes)
    /// * `m2` - Right child (n bytes)
    ///
    /// # Returns
    /// n-byte hash output
    fn h(pk_seed: &[u8], adrs: &Address, m1: &[u8], m2: &[u8]) -> Vec<u8>;

    /// Tl: Multi-input hash function.
    ///
    /// FIPS 205, Section 10.1
    ///
    /// Used for: WOTS+ and FORS public key compression
    ///
    /// # Arguments
    /// * `pk_seed` - Public seed (n bytes)
    /// * `adrs` - Address structure for domain separation
    /// * `m` - Input message (l*n bytes where l is the number of inputs)
    ///
    /// # Returns
    /// n-byte hash output
    fn t_l(pk_seed: &[u8], adrs: &Address, m: &[u8]) -> Vec<u8>;
}

//! SHAKE-based hash function implementations for SLH-DSA.
//!
//! This module provides hash function implementations for the SHAKE-based
//! SLH-DSA parameter sets (SHAKE-128s/f, SHAKE-192s/f, SHAKE-256s/f).
//!
//! FIPS 205, Section 10.1 defines the SHAKE-based hash functions. These
//! implementations back the unshared code paths only; the masked signing
//! pipeline runs its own permutation (see [`crate::keccak`]).

use crate::address::Address;
use crate::hash::HashSuite;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};
use zeroize::Zeroizing;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec;

/// SHAKE256-based hash suite for 128-bit security (n=16).
pub struct Shake128Hash;

/// SHAKE256-based hash suite for 192-bit security (n=24).
pub struct Shake192Hash;

/// SHAKE256-based hash suite for 256-bit security (n=32).
pub struct Shake256Hash;

/// Macro to implement HashSuite for a specific security level.
macro_rules! impl_shake_hash_suite {
    ($name:ident, $n:expr) => {
        impl HashSuite for $name {
            const N: usize = $n;

            fn prf_msg(sk_prf: &[u8], opt_rand: &[u8], message: &[u8]) -> Zeroizing<Vec<u8>> {
                // PRFmsg(SK.prf, OptRand, M) = SHAKE256(SK.prf || OptRand || M, 8n)
                // Use streaming API to avoid copying secret key to heap
                let mut hasher = Shake256::default();
                hasher.update(sk_prf);
                hasher.update(opt_rand);
                hasher.update(message);
                let mut reader = hasher.finalize_xof();
                let mut output = Zeroizing::new(vec![0u8; $n]);
                reader.read(&mut output);
                output
            }

            fn h_msg(
                r: &[u8],
                pk_seed: &[u8],
                pk_root: &[u8],
                message: &[u8],
                out_len: usize,
            ) -> Vec<u8> {
                // Hmsg(R, PK.seed, PK.root, M) = SHAKE256(R || PK.seed || PK.root || M, 8*out_len)
                let mut hasher = Shake256::default();
                hasher.update(r);
                hasher.update(pk_seed);
                hasher.update(pk_root);
                hasher.update(message);
                let mut reader = hasher.finalize_xof();
                let mut output = vec![0u8; out_len];
                reader.read(&mut output);
                output
            }

            fn f(pk_seed: &[u8], adrs: &Address, m1: &[u8]) -> Vec<u8> {
                // F(PK.seed, ADRS, M1) = SHAKE256(PK.seed || ADRS || M1, 8n)
                let mut hasher = Shake256::default();
                hasher.update(pk_seed);
                hasher.update(adrs.as_bytes());
                hasher.update(m1);
                let mut reader = hasher.finalize_xof();
                let mut output = vec![0u8; $n];
                reader.read(&mut output);
                output
            }

            fn h(pk_seed: &[u8], adrs: &Address, m1: &[u8], m2: &[u8]) -> Vec<u8> {
                // H(PK.seed, ADRS, M1 || M2) = SHAKE256(PK.seed || ADRS || M1 || M2, 8n)
                let mut hasher = Shake256::default();
                hasher.update(pk_seed);
                hasher.update(adrs.as_bytes());
                hasher.update(m1);
                hasher.update(m2);
                let mut reader = hasher.finalize_xof();
                let mut output = vec![0u8; $n];
                reader.read(&mut output);
                output
            }

            fn t_l(pk_seed: &[u8], adrs: &Address, m: &[u8]) -> Vec<u8> {
                // Tl(PK.seed, ADRS, M) = SHAKE256(PK.seed || ADRS || M, 8n)
                let mut hasher = Shake256::default();
                hasher.update(pk_seed);
                hasher.update(adrs.as_bytes());
                hasher.update(m);
                let mut reader = hasher.finalize_xof();
                let mut output = vec![0u8; $n];
                reader.read(&mut output);
                output
            }
        }
    };
}

impl_shake_hash_suite!(Shake128Hash, 16);
impl_shake_hash_suite!(Shake192Hash, 24);
impl_shake_hash_suite!(Shake256Hash, 32);

//! SLH-DSA-SHAKE with a first-order masked signing core
//!
//! This crate provides a pure Rust implementation of the SLH-DSA digital
//! signature algorithm over the SHAKE256 "simple" parameter family, with
//! key generation and signing hardened against first-order side-channel
//! analysis: every secret value on those paths is carried as three XOR
//! shares (`x = x0 ^ x1 ^ x2`) and is only unmasked when it becomes the
//! public output of a one-way hash.
//!
//! # Supported Parameter Sets
//!
//! | Variant | Security Level | Public Key | Signature |
//! |---------|----------------|------------|-----------|
//! | SLH-DSA-SHAKE-128s | Level 1 | 32 bytes | 7,856 bytes |
//! | SLH-DSA-SHAKE-128f | Level 1 | 32 bytes | 17,088 bytes |
//! | SLH-DSA-SHAKE-192s | Level 3 | 48 bytes | 16,224 bytes |
//! | SLH-DSA-SHAKE-192f | Level 3 | 48 bytes | 35,664 bytes |
//! | SLH-DSA-SHAKE-256s | Level 5 | 64 bytes | 29,792 bytes |
//! | SLH-DSA-SHAKE-256f | Level 5 | 64 bytes | 49,856 bytes |
//!
//! The "s" variants produce smaller signatures but are slower to sign.
//! The "f" variants are faster to sign but produce larger signatures.
//!
//! # Architecture
//!
//! The classic SLH-DSA building blocks are all here — WOTS+, FORS and the
//! multi-layer hypertree — but the signing side runs on a masked core:
//!
//! - [`keccak`]: a Keccak-f[1600] permutation over a 3-share state, with
//!   a blinded prefix/suffix of rounds and an unshared middle
//! - [`chain`]: the persistent masked SHAKE block a WOTS+ chain is
//!   evaluated in
//! - [`prf_tree`]: 4-ary hash trees that replace the flat FIPS 205 `PRF`
//!   for deriving WOTS+ and FORS secrets, with iterator and random-access
//!   evaluation
//! - [`context`]: the per-signer session state and per-signature key
//!   schedule
//!
//! Verification touches public data only and is a standards-compliant
//! FIPS 205 verifier; signatures and public keys are FIPS 205 wire
//! format. Secret keys are not: the seed is stored as its three shares,
//! and the seed-to-secret derivation is the PRF tree, so key material
//! does not interoperate with a stock FIPS 205 implementation.
//!
//! # Example
//!
//! ```rust
//! use triptych_slh_dsa::SlhDsaShake128f;
//! use triptych_core::Signer;
//!
//! let mut rng = rand::rng();
//! let (sk, pk) = SlhDsaShake128f::keygen(&mut rng).unwrap();
//!
//! let message = b"Hello, post-quantum world!";
//! let signature = SlhDsaShake128f::sign(&sk, message).unwrap();
//!
//! assert!(SlhDsaShake128f::verify(&pk, message, &signature).is_ok());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
// Clippy allowances for cryptographic code patterns
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::wildcard_imports,
    clippy::too_many_lines,
    clippy::items_after_statements,
    clippy::needless_range_loop
)]

// alloc is available in both std and no_std environments
extern crate alloc;

// Core modules
mod address;
mod hash;
/// SHAKE-based hash function implementations (unshared paths).
pub mod hash_shake;
/// SLH-DSA parameter constants for all variants.
pub mod params;
#[cfg(feature = "any-variant")]
mod types;
mod utils;

// Masked signing core
/// Masked Keccak-f[1600] permutation.
pub mod keccak;
/// Masked F evaluation over a persistent chain state.
pub mod chain;
/// Per-signer session context and key schedule.
pub mod context;
/// Masked PRF trees for WOTS+/FORS secret derivation.
pub mod prf_tree;

// Building blocks
mod fors;
mod hypertree;
mod merkle;
mod wots;
mod xmss;

// Main signing module
/// Core SLH-DSA signing algorithms.
pub mod sign;

// Variant-specific modules (public for access to SigningKey, VerificationKey, Signature types)
#[cfg(feature = "slh-dsa-shake-128f")]
pub mod slh_dsa_shake_128f;
#[cfg(feature = "slh-dsa-shake-128s")]
pub mod slh_dsa_shake_128s;
#[cfg(feature = "slh-dsa-shake-192f")]
pub mod slh_dsa_shake_192f;
#[cfg(feature = "slh-dsa-shake-192s")]
pub mod slh_dsa_shake_192s;
#[cfg(feature = "slh-dsa-shake-256f")]
pub mod slh_dsa_shake_256f;
#[cfg(feature = "slh-dsa-shake-256s")]
pub mod slh_dsa_shake_256s;

// Public exports
pub use address::{Address, AdrsType};
pub use context::SigningContext;
pub use hash::HashSuite;
pub use hash_shake::{Shake128Hash, Shake192Hash, Shake256Hash};

// Re-export core types
pub use triptych_core::{Error, Result, Signer};

// Variant exports
#[cfg(feature = "slh-dsa-shake-128f")]
pub use slh_dsa_shake_128f::SlhDsaShake128f;
#[cfg(feature = "slh-dsa-shake-128s")]
pub use slh_dsa_shake_128s::SlhDsaShake128s;
#[cfg(feature = "slh-dsa-shake-192f")]
pub use slh_dsa_shake_192f::SlhDsaShake192f;
#[cfg(feature = "slh-dsa-shake-192s")]
pub use slh_dsa_shake_192s::SlhDsaShake192s;
#[cfg(feature = "slh-dsa-shake-256f")]
pub use slh_dsa_shake_256f::SlhDsaShake256f;
#[cfg(feature = "slh-dsa-shake-256s")]
pub use slh_dsa_shake_256s::SlhDsaShake256s;

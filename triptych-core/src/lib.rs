//! # Triptych Core
//!
//! Core traits and utilities for the Triptych post-quantum signature library.
//!
//! This crate provides:
//! - Common error types
//! - The [`Signer`] trait implemented by every parameter set
//! - Secure memory handling with zeroize integration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Signer;

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;

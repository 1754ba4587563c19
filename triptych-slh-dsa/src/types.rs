//! Key type wrapper macros for SLH-DSA.
//!
//! This module provides macros to generate the key type wrappers
//! (SigningKey, VerificationKey, Signature) and Signer implementation
//! for each SLH-DSA variant.

/// Generate SLH-DSA types and Signer implementation for a specific parameter set.
///
/// Creates SigningKey, VerificationKey, Signature types and implements
/// the Signer trait for the variant marker type.
macro_rules! define_slh_dsa_variant {
    (
        variant_name: $variant_name:ident,
        hash_type: $hash_type:ty,
        sk_size: $sk_size:expr,
        pk_size: $pk_size:expr,
        sig_size: $sig_size:expr
    ) => {
        use crate::sign::{slh_keygen, slh_sign, slh_verify, PublicKey, SecretKey};

        use rand_core::CryptoRng;
        use triptych_core::{Error, Result, Signer};
        use zeroize::{Zeroize, ZeroizeOnDrop};

        #[cfg(not(feature = "std"))]
        use alloc::vec::Vec;

        /// Signing key (secret key).
        ///
        /// The serialized form is not the FIPS 205 secret key: the first 3n
        /// bytes are the secret seed's three masking shares, fixed at key
        /// generation (see [`SecretKey`]).
        pub struct SigningKey(SecretKey<N>);

        impl SigningKey {
            /// Create a signing key from bytes.
            ///
            /// Returns [`Error::InvalidKeyLength`] unless `bytes` is exactly
            /// `SK_BYTES` (6n) long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                SecretKey::from_bytes(bytes)
                    .map(Self)
                    .ok_or(Error::InvalidKeyLength {
                        expected: SK_BYTES,
                        actual: bytes.len(),
                    })
            }

            /// Serialize the signing key to bytes.
            ///
            /// Note: The returned vector contains secret key material
            /// (including the seed shares) and should be zeroized after use.
            pub fn to_bytes(&self) -> Vec<u8> {
                // Convert from Zeroizing<Vec<u8>> to Vec<u8>
                // The internal to_bytes uses Zeroizing for automatic cleanup
                self.0.to_bytes().as_slice().to_vec()
            }

            /// Get the corresponding verification key.
            pub fn verification_key(&self) -> VerificationKey {
                VerificationKey(PublicKey {
                    pk_seed: self.0.pk_seed,
                    pk_root: self.0.pk_root,
                })
            }
        }

        impl Clone for SigningKey {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl Zeroize for SigningKey {
            fn zeroize(&mut self) {
                self.0.sk_seed.zeroize();
                self.0.sk_prf.zeroize();
            }
        }

        impl ZeroizeOnDrop for SigningKey {}

        impl Drop for SigningKey {
            fn drop(&mut self) {
                self.zeroize();
            }
        }

        /// Verification key (public key).
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct VerificationKey(PublicKey<N>);

        impl VerificationKey {
            /// Create a verification key from bytes (FIPS 205 format,
            /// `pk_seed || pk_root`).
            ///
            /// Returns [`Error::InvalidKeyLength`] unless `bytes` is exactly
            /// `PK_BYTES` (2n) long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                PublicKey::from_bytes(bytes)
                    .map(Self)
                    .ok_or(Error::InvalidKeyLength {
                        expected: PK_BYTES,
                        actual: bytes.len(),
                    })
            }

            /// Serialize the verification key to bytes.
            pub fn to_bytes(&self) -> Vec<u8> {
                self.0.to_bytes()
            }
        }

        /// Signature.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct Signature(Vec<u8>);

        impl Signature {
            /// Create a signature from bytes (FIPS 205 format).
            ///
            /// Returns [`Error::InvalidSignatureLength`] unless `bytes` is
            /// exactly `SIG_BYTES` long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != SIG_BYTES {
                    return Err(Error::InvalidSignatureLength {
                        expected: SIG_BYTES,
                        actual: bytes.len(),
                    });
                }
                Ok(Self(bytes.to_vec()))
            }

            /// Get the signature bytes.
            pub fn to_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsRef<[u8]> for Signature {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        /// Algorithm marker type.
        pub struct $variant_name;

        impl Signer for $variant_name {
            type SigningKey = SigningKey;
            type VerificationKey = VerificationKey;
            type Signature = Signature;

            const SIGNING_KEY_SIZE: usize = SK_BYTES;
            const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
            const SIGNATURE_SIZE: usize = SIG_BYTES;

            fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)> {
                let (sk, pk) = slh_keygen::<$hash_type, N, WOTS_LEN, H_PRIME, D>(rng);
                Ok((SigningKey(sk), VerificationKey(pk)))
            }

            fn sign(sk: &Self::SigningKey, message: &[u8]) -> Result<Self::Signature> {
                let sig = slh_sign::<$hash_type, N, WOTS_LEN, WOTS_LEN1, H_PRIME, D, K, A>(
                    &sk.0, message, None,
                );
                Ok(Signature(sig))
            }

            fn verify(
                pk: &Self::VerificationKey,
                message: &[u8],
                signature: &Self::Signature,
            ) -> Result<()> {
                if slh_verify::<$hash_type, N, WOTS_LEN, WOTS_LEN1, H_PRIME, D, K, A>(
                    &pk.0,
                    message,
                    &signature.0,
                ) {
                    Ok(())
                } else {
                    Err(Error::VerificationFailed)
                }
            }
        }

    };
}

pub(crate) use define_slh_dsa_variant;

//! Cryptographic primitive traits.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Digital signature trait.
///
/// This trait defines the interface for digital signature schemes
/// as specified in NIST post-quantum cryptography standards.
///
/// # Example
///
/// ```ignore
/// use triptych_core::Signer;
///
/// let (sk, pk) = MySigner::keygen(&mut rng)?;
/// let sig = MySigner::sign(&sk, message)?;
/// MySigner::verify(&pk, message, &sig)?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Maximum size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (signing_key, verification_key).
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Sign a message.
    ///
    /// # Arguments
    ///
    /// * `sk` - The signing (private) key.
    /// * `message` - The message to sign.
    ///
    /// # Returns
    ///
    /// The signature.
    fn sign(sk: &Self::SigningKey, message: &[u8]) -> Result<Self::Signature>;

    /// Verify a signature.
    ///
    /// # Arguments
    ///
    /// * `pk` - The verification (public) key.
    /// * `message` - The message that was signed.
    /// * `signature` - The signature to verify.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the signature is valid, `Err(Error::VerificationFailed)` otherwise.
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<()>;
}

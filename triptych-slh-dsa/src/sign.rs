//! Core SLH-DSA signing algorithms.
//!
//! This module contains the main KeyGen, Sign, and Verify drivers. The
//! algorithm shapes follow FIPS 205 (Algorithms 20-22) and the outputs
//! are FIPS 205 wire format, but key generation and signing run on the
//! masked pipeline: the secret seed exists only as three XOR shares, and
//! all WOTS+/FORS secrets derive from it through the masked PRF trees.
//!
//! Because the seed-to-secret derivation is the PRF tree rather than the
//! flat FIPS 205 `PRF`, key pairs are not interchangeable with a stock
//! FIPS 205 implementation — but signatures made here verify under any
//! standards-compliant verifier, given the matching public key.

use crate::address::{Address, AdrsType};
use crate::context::SigningContext;
use crate::fors::{fors_pk_from_sig, fors_sign};
use crate::hash::HashSuite;
use crate::hypertree::{ht_root, ht_sign, ht_verify};

use rand_core::CryptoRng;
use zeroize::{Zeroize, Zeroizing};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Secret key components.
///
/// The secret seed is held as its three masking shares; the unshared seed
/// is never stored. The split is fixed at key generation and is part of
/// the key material, which keeps signing fully deterministic.
///
/// Implements `Zeroize` via derive and manual `Drop` to ensure secret
/// material is securely erased from memory when the key is dropped.
#[derive(Clone, Zeroize)]
pub struct SecretKey<const N: usize> {
    /// Secret seed for key generation, as three XOR shares.
    pub sk_seed: [[u8; N]; 3],
    /// Secret PRF key for randomness generation.
    pub sk_prf: [u8; N],
    /// Public seed.
    pub pk_seed: [u8; N],
    /// Public key root.
    pub pk_root: [u8; N],
}

impl<const N: usize> SecretKey<N> {
    /// The seed shares as one flat 3n-byte buffer, the layout the session
    /// context consumes.
    pub(crate) fn seed_shares(&self) -> Zeroizing<Vec<u8>> {
        let mut flat = Zeroizing::new(Vec::with_capacity(3 * N));
        for share in &self.sk_seed {
            flat.extend_from_slice(share);
        }
        flat
    }

    /// Serialize the secret key to bytes.
    ///
    /// Layout: `sk_seed` shares (3n) || `sk_prf` || `pk_seed` || `pk_root`.
    /// This is deliberately not the FIPS 205 secret-key format: the seed
    /// shares replace the plain seed.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(Vec::with_capacity(N * 6));
        for share in &self.sk_seed {
            bytes.extend_from_slice(share);
        }
        bytes.extend_from_slice(&self.sk_prf);
        bytes.extend_from_slice(&self.pk_seed);
        bytes.extend_from_slice(&self.pk_root);
        bytes
    }

    /// Deserialize a secret key from bytes.
    ///
    /// Writes directly into struct fields to avoid intermediate buffers
    /// that would need manual zeroization.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N * 6 {
            return None;
        }
        let mut key = Self {
            sk_seed: [[0u8; N]; 3],
            sk_prf: [0u8; N],
            pk_seed: [0u8; N],
            pk_root: [0u8; N],
        };
        for (share, chunk) in key.sk_seed.iter_mut().zip(bytes[..3 * N].chunks_exact(N)) {
            share.copy_from_slice(chunk);
        }
        key.sk_prf.copy_from_slice(&bytes[3 * N..4 * N]);
        key.pk_seed.copy_from_slice(&bytes[4 * N..5 * N]);
        key.pk_root.copy_from_slice(&bytes[5 * N..]);
        Some(key)
    }
}

impl<const N: usize> Drop for SecretKey<N> {
    fn drop(&mut self) {
        // Zeroize all fields using the derived Zeroize impl
        self.zeroize();
    }
}

/// Public key components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<const N: usize> {
    /// Public seed.
    pub pk_seed: [u8; N],
    /// Public key root.
    pub pk_root: [u8; N],
}

impl<const N: usize> PublicKey<N> {
    /// Serialize the public key to bytes (FIPS 205 format:
    /// `pk_seed || pk_root`).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(N * 2);
        bytes.extend_from_slice(&self.pk_seed);
        bytes.extend_from_slice(&self.pk_root);
        bytes
    }

    /// Deserialize a public key from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N * 2 {
            return None;
        }
        let mut pk_seed = [0u8; N];
        let mut pk_root = [0u8; N];
        pk_seed.copy_from_slice(&bytes[..N]);
        pk_root.copy_from_slice(&bytes[N..]);
        Some(Self { pk_seed, pk_root })
    }
}

/// Generate an SLH-DSA key pair.
///
/// FIPS 205, Algorithm 20 shape. Draws `sk_seed`, `sk_prf` and `pk_seed`
/// from the RNG, then splits `sk_seed` into three shares — two fresh
/// random, the third derived — before the unshared seed is wiped. The
/// masking randomness influences only the shares, never the public key
/// or any signature.
///
/// # Type Parameters
/// * `H` - Hash suite
/// * `N` - Security parameter (hash output size)
/// * `WOTS_LEN` - WOTS+ signature length
/// * `H_PRIME` - XMSS tree height
/// * `D` - Number of hypertree layers
pub fn slh_keygen<
    H: HashSuite,
    const N: usize,
    const WOTS_LEN: usize,
    const H_PRIME: usize,
    const D: usize,
>(
    rng: &mut impl CryptoRng,
) -> (SecretKey<N>, PublicKey<N>) {
    let mut seed = Zeroizing::new([0u8; N]);
    let mut sk_prf = [0u8; N];
    let mut pk_seed = [0u8; N];
    rng.fill_bytes(&mut *seed);
    rng.fill_bytes(&mut sk_prf);
    rng.fill_bytes(&mut pk_seed);

    // 2-of-3 split: two shares are uniform, the third reconstructs.
    let mut shares = Zeroizing::new([[0u8; N]; 3]);
    rng.fill_bytes(&mut shares[1]);
    rng.fill_bytes(&mut shares[2]);
    for j in 0..N {
        shares[0][j] = seed[j] ^ shares[1][j] ^ shares[2][j];
    }

    slh_keygen_internal::<H, N, WOTS_LEN, H_PRIME, D>(*shares, sk_prf, pk_seed)
}

/// Internal key generation from an explicit seed split.
///
/// Computes `PK.root` as the root of the top-layer Merkle tree, built
/// entirely through the masked pipeline. Two different splits of the
/// same logical seed produce the same public key.
///
/// # Arguments
/// * `sk_seed` - The three seed shares
/// * `sk_prf` - Secret PRF key for randomness generation
/// * `pk_seed` - Public seed
pub fn slh_keygen_internal<
    H: HashSuite,
    const N: usize,
    const WOTS_LEN: usize,
    const H_PRIME: usize,
    const D: usize,
>(
    sk_seed: [[u8; N]; 3],
    sk_prf: [u8; N],
    pk_seed: [u8; N],
) -> (SecretKey<N>, PublicKey<N>) {
    let mut sk = SecretKey {
        sk_seed,
        sk_prf,
        pk_seed,
        pk_root: [0u8; N],
    };

    let ctx = SigningContext::new(&pk_seed, &sk.seed_shares(), D);
    let pk_root_vec = ht_root::<H, WOTS_LEN>(&ctx, H_PRIME, D);
    sk.pk_root.copy_from_slice(&pk_root_vec);

    let pk = PublicKey {
        pk_seed,
        pk_root: sk.pk_root,
    };

    (sk, pk)
}

/// Sign a message using SLH-DSA.
///
/// FIPS 205, Algorithm 21 shape, over the masked pipeline. Fully
/// deterministic: `opt_rand` defaults to `pk_seed`, and the masking
/// split inside the key never shows up in the signature bytes.
///
/// # Type Parameters
/// * `H` - Hash suite
/// * `N` - Security parameter
/// * `WOTS_LEN` - WOTS+ signature length
/// * `WOTS_LEN1` - WOTS+ len1 parameter
/// * `H_PRIME` - XMSS tree height
/// * `D` - Number of hypertree layers
/// * `K` - Number of FORS trees
/// * `A` - FORS tree height
///
/// # Arguments
/// * `sk` - Secret key
/// * `message` - Message to sign
/// * `opt_rand` - Optional randomness (if None, uses pk_seed for deterministic signing)
///
/// # Returns
/// Signature bytes
#[allow(clippy::too_many_arguments)]
pub fn slh_sign<
    H: HashSuite,
    const N: usize,
    const WOTS_LEN: usize,
    const WOTS_LEN1: usize,
    const H_PRIME: usize,
    const D: usize,
    const K: usize,
    const A: usize,
>(
    sk: &SecretKey<N>,
    message: &[u8],
    opt_rand: Option<&[u8]>,
) -> Vec<u8> {
    // Use pk_seed as opt_rand for deterministic signing if not provided
    let randomness = opt_rand.unwrap_or(&sk.pk_seed);

    // Generate randomness R
    let r = H::prf_msg(&sk.sk_prf, randomness, message);

    // Calculate digest length: need enough bytes for md || idx_tree || idx_leaf
    // md: K*A bits, idx_tree: H_PRIME*(D-1) bits, idx_leaf: H_PRIME bits
    let md_bytes = (K * A).div_ceil(8);
    let tree_bytes = (H_PRIME * (D - 1)).div_ceil(8);
    let leaf_bytes = H_PRIME.div_ceil(8);
    let digest_len = md_bytes + tree_bytes + leaf_bytes;

    // Compute message digest
    let digest = H::h_msg(&r, &sk.pk_seed, &sk.pk_root, message, digest_len);

    // Parse digest into (md, idx_tree, idx_leaf)
    let (md, idx_tree, idx_leaf) = parse_digest::<K, A, H_PRIME, D>(&digest);

    // Session context: derive the per-layer keys for this path.
    let mut ctx = SigningContext::new(&sk.pk_seed, &sk.seed_shares(), D);
    ctx.prepare_path(idx_tree, idx_leaf, H_PRIME * D, H_PRIME, WOTS_LEN);

    // Set up FORS address
    let mut fors_addr = Address::new();
    fors_addr.set_type(AdrsType::ForsTree);
    fors_addr.set_tree(idx_tree);
    fors_addr.set_keypair(idx_leaf);

    // Assemble signature: R || SIG_FORS || SIG_HT
    let fors_sig_len = K * (A + 1) * N;
    let ht_sig_len = D * (WOTS_LEN + H_PRIME) * N;
    let mut signature = vec![0u8; N + fors_sig_len + ht_sig_len];
    signature[..N].copy_from_slice(&r);

    let (fors_window, ht_window) = signature[N..].split_at_mut(fors_sig_len);

    // FORS signature; the public key falls out of the same pass.
    let mut pk_fors = vec![0u8; N];
    fors_sign::<H>(fors_window, &mut pk_fors, &md, &ctx, &fors_addr, K, A);

    // Hypertree signature over the FORS public key.
    ht_sign::<H, WOTS_LEN, WOTS_LEN1>(ht_window, &pk_fors, &ctx, idx_tree, idx_leaf, H_PRIME, D);

    signature
}

/// Verify an SLH-DSA signature.
///
/// FIPS 205, Algorithm 22: slh_verify(M, SIG, PK)
///
/// Verification handles public data only and therefore runs entirely on
/// unshared code paths; it is byte-compatible with any standards-compliant
/// verifier.
///
/// # Type Parameters
/// * `H` - Hash suite
/// * `N` - Security parameter
/// * `WOTS_LEN` - WOTS+ signature length
/// * `WOTS_LEN1` - WOTS+ len1 parameter
/// * `H_PRIME` - XMSS tree height
/// * `D` - Number of hypertree layers
/// * `K` - Number of FORS trees
/// * `A` - FORS tree height
///
/// # Returns
/// true if signature is valid
pub fn slh_verify<
    H: HashSuite,
    const N: usize,
    const WOTS_LEN: usize,
    const WOTS_LEN1: usize,
    const H_PRIME: usize,
    const D: usize,
    const K: usize,
    const A: usize,
>(
    pk: &PublicKey<N>,
    message: &[u8],
    signature: &[u8],
) -> bool {
    // Calculate expected signature size
    let fors_sig_len = K * (A + 1) * N;
    let ht_sig_len = D * (WOTS_LEN * N + H_PRIME * N);
    let expected_sig_len = N + fors_sig_len + ht_sig_len;

    if signature.len() != expected_sig_len {
        return false;
    }

    // Parse signature: R || SIG_FORS || SIG_HT
    let r = &signature[..N];
    let sig_fors = &signature[N..N + fors_sig_len];
    let sig_ht = &signature[N + fors_sig_len..];

    // Calculate digest length: need enough bytes for md || idx_tree || idx_leaf
    let md_bytes = (K * A).div_ceil(8);
    let tree_bytes = (H_PRIME * (D - 1)).div_ceil(8);
    let leaf_bytes = H_PRIME.div_ceil(8);
    let digest_len = md_bytes + tree_bytes + leaf_bytes;

    // Compute message digest
    let digest = H::h_msg(r, &pk.pk_seed, &pk.pk_root, message, digest_len);

    // Parse digest into (md, idx_tree, idx_leaf)
    let (md, idx_tree, idx_leaf) = parse_digest::<K, A, H_PRIME, D>(&digest);

    // Set up FORS address
    let mut adrs = Address::new();
    adrs.set_type(AdrsType::ForsTree);
    adrs.set_tree(idx_tree);
    adrs.set_keypair(idx_leaf);

    // Recover FORS public key from signature
    let pk_fors = fors_pk_from_sig::<H>(sig_fors, &md, &pk.pk_seed, &mut adrs, K, A);

    // Verify hypertree signature
    ht_verify::<H, WOTS_LEN, WOTS_LEN1>(
        &pk_fors,
        sig_ht,
        &pk.pk_seed,
        idx_tree,
        idx_leaf,
        &pk.pk_root,
        H_PRIME,
        D,
    )
}

/// Parse digest into FORS message digest, tree index, and leaf index.
///
/// FIPS 205, Section 9.2: The digest is split at byte boundaries:
/// - First ceil(k*a/8) bytes: FORS message digest (md)
/// - Next ceil(h'*(d-1)/8) bytes: Tree index (idx_tree)
/// - Next ceil(h'/8) bytes: Leaf index (idx_leaf)
///
/// The tree and leaf indices are masked to their respective bit widths.
fn parse_digest<const K: usize, const A: usize, const H_PRIME: usize, const D: usize>(
    digest: &[u8],
) -> (Vec<u8>, u64, u32) {
    // Calculate bit positions
    let md_bits = K * A;
    let tree_bits = H_PRIME * (D - 1); // Total height - h' for bottom layer
    let leaf_bits = H_PRIME;

    // Calculate byte boundaries
    let md_bytes = md_bits.div_ceil(8);
    let tree_bytes = tree_bits.div_ceil(8);
    let leaf_bytes = leaf_bits.div_ceil(8);

    // Extract message digest for FORS (first md_bytes)
    let md = digest[..md_bytes].to_vec();

    // Extract tree index (next tree_bytes)
    let tree_start = md_bytes;
    let mut idx_tree: u64 = 0;
    for i in 0..tree_bytes {
        if tree_start + i < digest.len() {
            idx_tree = (idx_tree << 8) | u64::from(digest[tree_start + i]);
        }
    }
    // Mask to tree_bits
    if tree_bits > 0 && tree_bits < 64 {
        idx_tree &= (1u64 << tree_bits) - 1;
    }

    // Extract leaf index (next leaf_bytes)
    let leaf_start = tree_start + tree_bytes;
    let mut idx_leaf: u32 = 0;
    for i in 0..leaf_bytes {
        if leaf_start + i < digest.len() {
            idx_leaf = (idx_leaf << 8) | u32::from(digest[leaf_start + i]);
        }
    }
    // Mask to leaf_bits
    if leaf_bits > 0 && leaf_bits < 32 {
        idx_leaf &= (1u32 << leaf_bits) - 1;
    }

    (md, idx_tree, idx_leaf)
}

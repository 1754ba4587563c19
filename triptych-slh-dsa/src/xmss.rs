//! XMSS (eXtended Merkle Signature Scheme) verification.
//!
//! XMSS provides a single-layer Merkle tree of WOTS+ keys, allowing
//! 2^h' signatures per tree where h' is the tree height.
//!
//! Only the verifier half lives here. Producing an XMSS signature runs
//! through the masked pipeline (see [`crate::hypertree`]), where the
//! WOTS+ signature and the authentication path fall out of a single
//! treehash pass over masked leaves.
//!
//! FIPS 205, Algorithm 10 (verification part).

use crate::address::{Address, AdrsType};
use crate::hash::HashSuite;
use crate::wots::wots_pk_from_sig;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Compute XMSS public key (root) from signature.
///
/// FIPS 205, Algorithm 10 (verification part): Recovers the root from signature.
///
/// # Arguments
/// * `idx` - Leaf index used for signing
/// * `sig_xmss` - XMSS signature (WOTS+ signature || authentication path)
/// * `message` - Original message (n bytes)
/// * `pk_seed` - Public seed
/// * `adrs` - Address (will be modified during computation)
/// * `h_prime` - Height of this XMSS tree
///
/// # Returns
/// Recovered XMSS root (n bytes)
pub fn xmss_pk_from_sig<H: HashSuite, const WOTS_LEN: usize, const WOTS_LEN1: usize>(
    idx: u32,
    sig_xmss: &[u8],
    message: &[u8],
    pk_seed: &[u8],
    adrs: &Address,
    h_prime: usize,
) -> Vec<u8> {
    let n = H::N;
    let wots_sig_len = WOTS_LEN * n;

    // Extract WOTS+ signature and authentication path
    let sig_wots = &sig_xmss[..wots_sig_len];
    let auth = &sig_xmss[wots_sig_len..];

    // Recover WOTS+ public key
    let mut wots_adrs = *adrs;
    wots_adrs.set_type(AdrsType::WotsHash);
    wots_adrs.set_keypair(idx);
    let mut node =
        wots_pk_from_sig::<H, WOTS_LEN, WOTS_LEN1>(sig_wots, message, pk_seed, &mut wots_adrs);

    // Climb the tree using authentication path
    let mut tree_adrs = *adrs;
    tree_adrs.set_type(AdrsType::Tree);

    for j in 0..h_prime {
        tree_adrs.set_tree_height((j + 1) as u32);

        let auth_j = &auth[j * n..(j + 1) * n];

        if (idx >> j) & 1 == 0 {
            // Current node is left child
            tree_adrs.set_tree_index(idx >> (j + 1));
            node = H::h(pk_seed, &tree_adrs, &node, auth_j);
        } else {
            // Current node is right child
            tree_adrs.set_tree_index(idx >> (j + 1));
            node = H::h(pk_seed, &tree_adrs, auth_j, &node);
        }
    }

    node
}

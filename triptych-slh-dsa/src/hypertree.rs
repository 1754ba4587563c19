//! Hypertree signing and verification.
//!
//! The hypertree is a multi-layer structure of XMSS trees that provides
//! the main key management mechanism in SLH-DSA. It has d layers, each
//! containing XMSS trees of height h'.
//!
//! Signing is where this implementation departs from the FIPS 205
//! algorithm shape (while producing wire-identical signatures): each
//! layer's XMSS signature comes out of a single treehash pass over masked
//! WOTS+ leaves. The pass yields the WOTS+ signature (extracted in-stride
//! at the signing leaf), the authentication path, and the layer root —
//! so no separate `xmss_pk_from_sig` is needed on the signing path, and
//! the layer's chain secrets never exist outside 3-share form.
//!
//! FIPS 205, Algorithms 11-12 (verification unchanged).

use crate::address::{Address, AdrsType};
use crate::context::SigningContext;
use crate::hash::HashSuite;
use crate::merkle::{treehash, wots_gen_leaf, WotsLeafInfo, NO_SIGN_LEAF};
use crate::prf_tree::PrfIter;
use crate::wots::chain_lengths;
use crate::xmss::xmss_pk_from_sig;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Sign one XMSS layer with masked leaves, in a single treehash pass.
///
/// Writes `WOTS_LEN * n` bytes of WOTS+ signature and `h_prime * n` bytes
/// of authentication path into `sig_xmss`, and the layer root into
/// `root`. With `sign_leaf = NO_SIGN_LEAF` the pass only computes the
/// root (key generation); `sig_xmss` is then scratch.
fn xmss_sign_masked<H: HashSuite, const WOTS_LEN: usize>(
    sig_xmss: &mut [u8],
    root: &mut [u8],
    steps: Vec<u32>,
    ctx: &SigningContext,
    layer: u32,
    tree: u64,
    sign_leaf: u32,
    auth_leaf: u32,
    h_prime: usize,
) {
    let n = H::N;
    let leaves = 1u32 << h_prime;
    let n_ext = (WOTS_LEN as u32 + 1) * leaves;

    // The layer's PRF tree: WOTS_LEN chain secrets per leaf, swept in
    // leaf-major order. The trailing per-leaf externals are the child
    // seeds and stay out of this sweep.
    let mut prf_adrs = Address::new();
    prf_adrs.set_type(AdrsType::PrfMerkle);
    prf_adrs.set_layer(layer);
    prf_adrs.set_tree(tree);
    let mut iter = PrfIter::new(
        n_ext,
        WOTS_LEN as u32 * leaves,
        ctx.merkle_key(layer as usize),
        ctx.pub_seed(),
        prf_adrs,
    );

    let (wots_sig, auth_path) = sig_xmss.split_at_mut(WOTS_LEN * n);

    let mut leaf_adrs = Address::new();
    leaf_adrs.set_layer(layer);
    leaf_adrs.set_tree(tree);
    leaf_adrs.set_type(AdrsType::WotsHash);

    let mut pk_adrs = Address::new();
    pk_adrs.set_layer(layer);
    pk_adrs.set_tree(tree);
    pk_adrs.set_type(AdrsType::WotsPk);

    let mut info = WotsLeafInfo {
        wots_sig,
        wots_sign_leaf: sign_leaf,
        wots_steps: steps,
        leaf_adrs,
        pk_adrs,
    };

    let mut tree_adrs = Address::new();
    tree_adrs.set_layer(layer);
    tree_adrs.set_tree(tree);
    tree_adrs.set_type(AdrsType::Tree);

    treehash::<H, _>(
        root,
        auth_path,
        ctx.pub_seed(),
        auth_leaf,
        0,
        h_prime,
        &mut tree_adrs,
        |out, idx| wots_gen_leaf::<H>(out, ctx, idx, &mut info, &mut iter),
    );
}

/// Generate a hypertree signature.
///
/// FIPS 205, Algorithm 11 shape: one XMSS signature per layer, each layer
/// signing the root of the layer below (the bottom layer signs
/// `message`, normally the FORS public key). The per-layer roots come
/// out of the masked treehash passes directly.
///
/// # Arguments
/// * `sig_ht` - Output buffer, `d * (WOTS_LEN + h_prime) * n` bytes
/// * `message` - Message to sign (n bytes)
/// * `ctx` - Session context with the per-layer keys prepared
/// * `idx_tree` - Tree index at the bottom layer
/// * `idx_leaf` - Leaf index within the bottom tree
/// * `h_prime` - Height of each XMSS tree
/// * `d` - Number of hypertree layers
pub(crate) fn ht_sign<H: HashSuite, const WOTS_LEN: usize, const WOTS_LEN1: usize>(
    sig_ht: &mut [u8],
    message: &[u8],
    ctx: &SigningContext,
    idx_tree: u64,
    idx_leaf: u32,
    h_prime: usize,
    d: usize,
) {
    let n = H::N;
    let xmss_sig_len = WOTS_LEN * n + h_prime * n;
    debug_assert_eq!(sig_ht.len(), d * xmss_sig_len);

    let mut root = message.to_vec();
    let mut current_idx_tree = idx_tree;
    let mut current_idx_leaf = idx_leaf;

    for j in 0..d {
        let steps = chain_lengths(&root, WOTS_LEN, WOTS_LEN1);
        let mut layer_root = vec![0u8; n];

        xmss_sign_masked::<H, WOTS_LEN>(
            &mut sig_ht[j * xmss_sig_len..(j + 1) * xmss_sig_len],
            &mut layer_root,
            steps,
            ctx,
            j as u32,
            current_idx_tree,
            current_idx_leaf,
            current_idx_leaf,
            h_prime,
        );

        root = layer_root;
        current_idx_leaf = (current_idx_tree & ((1 << h_prime) - 1)) as u32;
        current_idx_tree >>= h_prime;
    }
}

/// Verify a hypertree signature.
///
/// FIPS 205, Algorithm 12: ht_verify(M, SIG_HT, PK.seed, idx_tree, idx_leaf, PK.root)
///
/// Verifies a signature through the d-layer hypertree.
///
/// # Arguments
/// * `message` - Original message (n bytes)
/// * `sig_ht` - Hypertree signature
/// * `pk_seed` - Public seed
/// * `idx_tree` - Tree index at the bottom layer
/// * `idx_leaf` - Leaf index within the bottom tree
/// * `pk_root` - Expected hypertree root
/// * `h_prime` - Height of each XMSS tree
/// * `d` - Number of hypertree layers
///
/// # Returns
/// true if signature is valid
#[allow(clippy::too_many_arguments)]
pub fn ht_verify<H: HashSuite, const WOTS_LEN: usize, const WOTS_LEN1: usize>(
    message: &[u8],
    sig_ht: &[u8],
    pk_seed: &[u8],
    idx_tree: u64,
    idx_leaf: u32,
    pk_root: &[u8],
    h_prime: usize,
    d: usize,
) -> bool {
    let n = H::N;
    let xmss_sig_len = WOTS_LEN * n + h_prime * n;

    // Verify at layer 0 (bottom layer)
    let mut adrs = Address::new();
    adrs.set_layer(0);
    adrs.set_tree(idx_tree);

    let sig_xmss_0 = &sig_ht[..xmss_sig_len];
    let mut node = xmss_pk_from_sig::<H, WOTS_LEN, WOTS_LEN1>(
        idx_leaf, sig_xmss_0, message, pk_seed, &adrs, h_prime,
    );

    // Verify at each subsequent layer
    let mut current_idx_tree = idx_tree;
    for j in 1..d {
        // Extract leaf index and tree index for this layer
        let idx_leaf_j = (current_idx_tree & ((1 << h_prime) - 1)) as u32;
        current_idx_tree >>= h_prime;

        adrs.set_layer(j as u32);
        adrs.set_tree(current_idx_tree);

        let sig_xmss_j = &sig_ht[j * xmss_sig_len..(j + 1) * xmss_sig_len];
        node = xmss_pk_from_sig::<H, WOTS_LEN, WOTS_LEN1>(
            idx_leaf_j, sig_xmss_j, &node, pk_seed, &adrs, h_prime,
        );
    }

    // Compare with expected root
    node == pk_root
}

/// Compute the hypertree root (public key component).
///
/// Used during key generation: a masked treehash pass over the top-layer
/// tree, whose WOTS+ chain secrets come from the PRF tree rooted in the
/// shared secret seed.
pub(crate) fn ht_root<H: HashSuite, const WOTS_LEN: usize>(
    ctx: &SigningContext,
    h_prime: usize,
    d: usize,
) -> Vec<u8> {
    let n = H::N;
    let mut root = vec![0u8; n];
    let mut scratch_sig = vec![0u8; WOTS_LEN * n + h_prime * n];

    xmss_sign_masked::<H, WOTS_LEN>(
        &mut scratch_sig,
        &mut root,
        vec![0u32; WOTS_LEN],
        ctx,
        (d - 1) as u32,
        0,
        NO_SIGN_LEAF,
        0,
        h_prime,
    );

    root
}

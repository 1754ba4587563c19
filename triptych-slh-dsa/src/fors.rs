//! FORS (Forest of Random Subsets) implementation.
//!
//! FORS is a few-time signature scheme that signs the message hash in
//! SLH-DSA. It uses k trees of height a, providing k*a bits of security
//! against message-dependent attacks.
//!
//! Signing is masked end to end: the per-leaf secrets are external nodes
//! of the FORS PRF tree and stay in 3-share form until the moment they
//! become public — either folded directly into the signature (the k
//! revealed secrets) or pushed through a final unblinded F (every leaf
//! hash). Verification reconstructs public values only and is plain
//! FIPS 205.

use crate::address::{Address, AdrsType};
use crate::chain::ChainState;
use crate::context::SigningContext;
use crate::hash::HashSuite;
use crate::merkle::treehash;
use crate::prf_tree::{eval_leaf, PrfIter};
use crate::utils::base_2b;
use zeroize::Zeroizing;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Produce a FORS signature and the corresponding FORS public key.
///
/// `sig` must be `k * (1 + a) * n` bytes; `pk` receives the n-byte public
/// key, which falls out of the same pass (all tree roots are computed
/// anyway). `fors_addr` carries the hypertree position: layer, tree and
/// key pair of the leaf being signed.
///
/// Per tree `i`, digit `i` of the message digest selects a leaf: its
/// still-masked secret is fetched by random access into the FORS PRF
/// tree, folded, and written into the signature, followed by the
/// authentication path from a full treehash pass whose leaf oracle draws
/// every leaf secret in order from a PRF-tree iterator and applies one
/// masked F with unmasked output.
pub(crate) fn fors_sign<H: HashSuite>(
    sig: &mut [u8],
    pk: &mut [u8],
    md: &[u8],
    ctx: &SigningContext,
    fors_addr: &Address,
    k: usize,
    a: usize,
) {
    let n = H::N;
    let t = 1u32 << a;
    let chunk = n + a * n;
    debug_assert_eq!(sig.len(), k * chunk);

    let indices = base_2b(md, a, k);

    // All derived addresses share the FORS address's position fields.
    let mut fors_tree_addr = Address::new();
    fors_tree_addr.set_layer(fors_addr.layer());
    fors_tree_addr.set_tree(fors_addr.tree());
    fors_tree_addr.set_type(AdrsType::ForsTree);
    fors_tree_addr.set_keypair(fors_addr.keypair());

    // The leaf oracle mutates its own copy.
    let mut leaf_adrs = fors_tree_addr;

    let mut prf_addr = Address::new();
    prf_addr.set_layer(fors_addr.layer());
    prf_addr.set_tree(fors_addr.tree());
    prf_addr.set_type(AdrsType::PrfFors);
    prf_addr.set_keypair(fors_addr.keypair());

    // One iterator sweeps the leaf secrets of all k trees in order.
    let total_leaves = k as u32 * t;
    let mut iter = PrfIter::new(
        total_leaves,
        total_leaves,
        ctx.fors_seed(),
        ctx.pub_seed(),
        prf_addr,
    );

    let mut roots = vec![0u8; k * n];
    let mut revealed = Zeroizing::new(vec![0u8; 3 * n]);

    for i in 0..k {
        let idx_offset = i as u32 * t;
        let leaf_index = indices[i] + idx_offset;
        let (sk_slot, auth_path) = sig[i * chunk..(i + 1) * chunk].split_at_mut(n);

        // The revealed secret: random access into the same PRF tree the
        // iterator is sweeping. The verifier expects it unmasked.
        let mut addr = prf_addr;
        eval_leaf(
            &mut revealed,
            ctx.fors_seed(),
            leaf_index,
            total_leaves,
            ctx.pub_seed(),
            &mut addr,
        );
        for j in 0..n {
            sk_slot[j] = revealed[j] ^ revealed[n + j] ^ revealed[2 * n + j];
        }

        fors_tree_addr.set_tree_index(leaf_index);

        treehash::<H, _>(
            &mut roots[i * n..(i + 1) * n],
            auth_path,
            ctx.pub_seed(),
            indices[i],
            idx_offset,
            a,
            &mut fors_tree_addr,
            |leaf_out, addr_idx| {
                // One masked F per leaf; the output is a public leaf hash,
                // so it comes out unblinded.
                let mut leaf_secret = Zeroizing::new(vec![0u8; 3 * n]);
                let _ = iter.next(&mut leaf_secret);

                leaf_adrs.set_tree_height(0);
                leaf_adrs.set_tree_index(addr_idx);

                let mut state = ChainState::new(ctx.pub_seed(), &leaf_adrs, &leaf_secret);
                state.transform(false);
                state.read_digest(leaf_out);
            },
        );
    }

    // Hash horizontally across all tree roots to derive the public key.
    let mut fors_pk_adrs = Address::new();
    fors_pk_adrs.set_layer(fors_addr.layer());
    fors_pk_adrs.set_tree(fors_addr.tree());
    fors_pk_adrs.set_type(AdrsType::ForsPk);
    fors_pk_adrs.set_keypair(fors_addr.keypair());
    pk.copy_from_slice(&H::t_l(ctx.pub_seed(), &fors_pk_adrs, &roots));
}

/// Compute FORS public key from signature.
///
/// Recovers the FORS public key from a signature and message digest.
/// Works on public data only and matches any FIPS 205 verifier.
///
/// # Arguments
/// * `sig_fors` - FORS signature
/// * `md` - Message digest
/// * `pk_seed` - Public seed
/// * `adrs` - Address (will be modified during computation)
/// * `k` - Number of FORS trees
/// * `a` - Height of each FORS tree
///
/// # Returns
/// Recovered FORS public key (n bytes)
pub fn fors_pk_from_sig<H: HashSuite>(
    sig_fors: &[u8],
    md: &[u8],
    pk_seed: &[u8],
    adrs: &mut Address,
    k: usize,
    a: usize,
) -> Vec<u8> {
    let n = H::N;
    let t = 1u32 << a;

    // Extract indices from message digest
    let indices = base_2b(md, a, k);

    // Collect all tree roots
    let mut roots = Vec::with_capacity(k * n);

    let sig_elem_size = n + a * n; // sk element + auth path

    for i in 0..k {
        let sig_i = &sig_fors[i * sig_elem_size..(i + 1) * sig_elem_size];
        let sk = &sig_i[..n];
        let auth = &sig_i[n..];

        let idx = indices[i]; // Leaf index within this tree
        let tree_idx = i as u32;
        let global_leaf_idx = tree_idx * t + idx;

        // Compute leaf from secret key
        adrs.set_type(AdrsType::ForsTree);
        adrs.set_tree_height(0);
        adrs.set_tree_index(global_leaf_idx);
        let mut node = H::f(pk_seed, adrs, sk);

        // Climb the tree using authentication path
        for j in 0..a {
            let auth_j = &auth[j * n..(j + 1) * n];

            // Compute parent node
            let parent_in_tree = idx >> (j + 1);
            let nodes_at_parent_level = t >> (j + 1);
            let global_parent_idx = tree_idx * nodes_at_parent_level + parent_in_tree;

            adrs.set_tree_height((j + 1) as u32);
            adrs.set_tree_index(global_parent_idx);

            if (idx >> j) & 1 == 0 {
                // Current node is left child
                node = H::h(pk_seed, adrs, &node, auth_j);
            } else {
                // Current node is right child
                node = H::h(pk_seed, adrs, auth_j, &node);
            }
        }

        roots.extend_from_slice(&node);
    }

    // Compress all roots to get public key
    let fors_pk_adrs = adrs.with_type(AdrsType::ForsPk);
    H::t_l(pk_seed, &fors_pk_adrs, &roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_shake::Shake128Hash;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const N: usize = 16;
    const K: usize = 4; // Small for testing
    const A: usize = 3; // Small tree height

    fn test_context(rng: &mut ChaCha20Rng) -> SigningContext {
        let mut pub_seed = vec![0u8; N];
        rng.fill_bytes(&mut pub_seed);
        let mut sk_shares = vec![0u8; 3 * N];
        rng.fill_bytes(&mut sk_shares);
        let mut ctx = SigningContext::new(&pub_seed, &sk_shares, 2);
        // Populate the FORS seed through the regular key schedule.
        ctx.prepare_path(3, 1, 6, 3, 5);
        ctx
    }

    fn fors_addr(tree: u64, keypair: u32) -> Address {
        let mut adrs = Address::new();
        adrs.set_type(AdrsType::ForsTree);
        adrs.set_tree(tree);
        adrs.set_keypair(keypair);
        adrs
    }

    #[test]
    fn test_masked_sign_verifies() {
        let mut rng = ChaCha20Rng::seed_from_u64(50);
        let ctx = test_context(&mut rng);
        let adrs = fors_addr(3, 1);
        let md = [0x5Au8; 8];

        let mut sig = vec![0u8; K * N * (1 + A)];
        let mut pk = vec![0u8; N];
        fors_sign::<Shake128Hash>(&mut sig, &mut pk, &md, &ctx, &adrs, K, A);

        let mut verify_adrs = fors_addr(3, 1);
        let recovered =
            fors_pk_from_sig::<Shake128Hash>(&sig, &md, ctx.pub_seed(), &mut verify_adrs, K, A);

        assert_eq!(pk, recovered);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let mut rng = ChaCha20Rng::seed_from_u64(51);
        let ctx = test_context(&mut rng);
        let adrs = fors_addr(3, 1);
        let md = [0x11u8; 8];

        let mut sig1 = vec![0u8; K * N * (1 + A)];
        let mut sig2 = vec![0u8; K * N * (1 + A)];
        let mut pk1 = vec![0u8; N];
        let mut pk2 = vec![0u8; N];
        fors_sign::<Shake128Hash>(&mut sig1, &mut pk1, &md, &ctx, &adrs, K, A);
        fors_sign::<Shake128Hash>(&mut sig2, &mut pk2, &md, &ctx, &adrs, K, A);

        assert_eq!(sig1, sig2);
        assert_eq!(pk1, pk2);
    }

    #[test]
    fn test_wrong_md_fails() {
        let mut rng = ChaCha20Rng::seed_from_u64(52);
        let ctx = test_context(&mut rng);
        let adrs = fors_addr(3, 1);
        let md = [0x55u8; 8];
        let wrong_md = [0xAAu8; 8];

        let mut sig = vec![0u8; K * N * (1 + A)];
        let mut pk = vec![0u8; N];
        fors_sign::<Shake128Hash>(&mut sig, &mut pk, &md, &ctx, &adrs, K, A);

        let mut verify_adrs = fors_addr(3, 1);
        let recovered = fors_pk_from_sig::<Shake128Hash>(
            &sig,
            &wrong_md,
            ctx.pub_seed(),
            &mut verify_adrs,
            K,
            A,
        );

        assert_ne!(pk, recovered);
    }

    #[test]
    fn test_different_maskings_sign_identically() {
        let mut rng = ChaCha20Rng::seed_from_u64(53);
        let mut pub_seed = vec![0u8; N];
        rng.fill_bytes(&mut pub_seed);
        let mut shares_a = vec![0u8; 3 * N];
        rng.fill_bytes(&mut shares_a);

        // A second, different 2-of-3 split of the same logical seed.
        let logical: Vec<u8> = (0..N)
            .map(|j| shares_a[j] ^ shares_a[N + j] ^ shares_a[2 * N + j])
            .collect();
        let mut shares_b = vec![0u8; 3 * N];
        rng.fill_bytes(&mut shares_b[N..]);
        for j in 0..N {
            shares_b[j] = logical[j] ^ shares_b[N + j] ^ shares_b[2 * N + j];
        }

        let adrs = fors_addr(5, 2);
        let md = [0xC3u8; 8];

        let mut sigs = Vec::new();
        for shares in [&shares_a, &shares_b] {
            let mut ctx = SigningContext::new(&pub_seed, shares, 2);
            ctx.prepare_path(5, 2, 6, 3, 5);
            let mut sig = vec![0u8; K * N * (1 + A)];
            let mut pk = vec![0u8; N];
            fors_sign::<Shake128Hash>(&mut sig, &mut pk, &md, &ctx, &adrs, K, A);
            sigs.push((sig, pk));
        }

        assert_eq!(sigs[0], sigs[1]);
    }
}

//! Merkle tree traversal with pluggable leaf generation.
//!
//! Hypertree layers and FORS trees both need the same thing from a tree
//! walk: the root, plus the authentication path for one distinguished
//! leaf, computed in a single left-to-right pass. What differs is how a
//! leaf comes into being — a full WOTS+ chain bundle for hypertree layers,
//! a single masked F for FORS — so [`treehash`] takes the leaf generator
//! as a closure and keeps the stack discipline to itself.
//!
//! [`wots_gen_leaf`] is the hypertree leaf generator. It drives every
//! Winternitz chain of one WOTS+ key through the masked chain state,
//! pulling chain seeds from the layer's PRF iterator, and doubles as the
//! WOTS+ signer: when it walks the leaf being signed, each chain's value
//! at the message-determined step is unmasked and written straight into
//! the signature.

use crate::address::{Address, AdrsType};
use crate::chain::ChainState;
use crate::context::SigningContext;
use crate::hash::HashSuite;
use crate::params::common::W;
use crate::prf_tree::PrfIter;
use zeroize::Zeroizing;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Sentinel for "no leaf is being signed in this pass" (key generation and
/// plain root computation).
pub(crate) const NO_SIGN_LEAF: u32 = u32::MAX;

/// Compute a Merkle root and the authentication path for `leaf_idx`.
///
/// Walks all `2^tree_height` leaves in order. Each freshly generated leaf
/// is merged up the stack as far as it can go; nodes that happen to be the
/// sibling of the path to `leaf_idx` are copied into `auth_path` on the
/// way. `idx_offset` shifts the tree-index ADRS field, which FORS uses to
/// give each of its trees a disjoint index range.
///
/// `gen_leaf(out, idx)` must write an n-byte leaf for absolute index
/// `idx`.
pub(crate) fn treehash<H: HashSuite, F>(
    root: &mut [u8],
    auth_path: &mut [u8],
    pub_seed: &[u8],
    leaf_idx: u32,
    idx_offset: u32,
    tree_height: usize,
    tree_adrs: &mut Address,
    mut gen_leaf: F,
) where
    F: FnMut(&mut [u8], u32),
{
    let n = H::N;
    debug_assert_eq!(auth_path.len(), tree_height * n);

    // One pending left node per level.
    let mut stack = vec![0u8; tree_height * n];
    let mut node = vec![0u8; n];

    let mut idx: u32 = 0;
    loop {
        gen_leaf(&mut node, idx + idx_offset);

        let mut internal_idx_offset = idx_offset;
        let mut internal_idx = idx;
        let mut internal_leaf = leaf_idx;
        let mut h = 0usize;
        loop {
            if h == tree_height {
                root.copy_from_slice(&node);
                return;
            }

            // Sibling of the distinguished path at this level?
            if internal_idx ^ internal_leaf == 1 {
                auth_path[h * n..(h + 1) * n].copy_from_slice(&node);
            }

            // A left child waits on the stack for its right sibling.
            if internal_idx & 1 == 0 {
                break;
            }

            // Right child: merge with the stacked left sibling.
            internal_idx_offset >>= 1;
            tree_adrs.set_tree_height(h as u32 + 1);
            tree_adrs.set_tree_index(internal_idx / 2 + internal_idx_offset);
            let merged = H::h(pub_seed, tree_adrs, &stack[h * n..(h + 1) * n], &node);
            node.copy_from_slice(&merged);

            h += 1;
            internal_idx >>= 1;
            internal_leaf >>= 1;
        }

        stack[h * n..(h + 1) * n].copy_from_slice(&node);
        idx += 1;
    }
}

/// Per-tree state for [`wots_gen_leaf`].
pub(crate) struct WotsLeafInfo<'s> {
    /// WOTS+ signature window of the signature being built
    /// (`wots_len * n` bytes). Written only while walking
    /// [`wots_sign_leaf`](Self::wots_sign_leaf).
    pub wots_sig: &'s mut [u8],
    /// Leaf whose WOTS+ signature should be extracted, or [`NO_SIGN_LEAF`].
    pub wots_sign_leaf: u32,
    /// Winternitz step per chain at which the signature value sits
    /// (message digits incl. checksum); ignored unless signing.
    pub wots_steps: Vec<u32>,
    /// WOTS hash address template (layer and tree set by the caller).
    pub leaf_adrs: Address,
    /// WOTS public-key compression address template.
    pub pk_adrs: Address,
}

/// Generate one WOTS+ leaf, and the WOTS+ signature if this is the leaf
/// being signed.
///
/// For each of the `wots_len` chains the secret chain seed is drawn from
/// `iter` (the layer's PRF-tree iterator, which must be positioned on this
/// leaf's first chain), loaded into a masked chain state, and stepped
/// `w - 1` times. All steps keep the running value in 3-share form except
/// the last one, whose output is the public chain top. When the chain
/// counter passes the signing step, the still-masked value is folded and
/// written into the signature window.
pub(crate) fn wots_gen_leaf<H: HashSuite>(
    dest: &mut [u8],
    ctx: &SigningContext,
    leaf_idx: u32,
    info: &mut WotsLeafInfo<'_>,
    iter: &mut PrfIter<'_>,
) {
    let n = H::N;
    let wots_len = info.wots_steps.len();
    let signing = leaf_idx == info.wots_sign_leaf;

    info.leaf_adrs.set_keypair(leaf_idx);
    info.pk_adrs.set_keypair(leaf_idx);

    let mut pk_buffer = vec![0u8; wots_len * n];
    let mut chain_seed = Zeroizing::new(vec![0u8; 3 * n]);

    for i in 0..wots_len {
        // The step to capture; an out-of-range step disables capture.
        let wots_k = if signing { info.wots_steps[i] } else { u32::MAX };

        let _ = iter.next(&mut chain_seed);

        info.leaf_adrs.set_type(AdrsType::WotsHash);
        info.leaf_adrs.set_chain(i as u32);
        info.leaf_adrs.set_hash(0);

        let mut chain = ChainState::new(ctx.pub_seed(), &info.leaf_adrs, &chain_seed);
        let mut not_last = true;

        let mut k = 0u32;
        loop {
            if k == wots_k {
                let slot = &mut info.wots_sig[i * n..(i + 1) * n];
                if not_last {
                    // Mid-chain values are still masked.
                    chain.unmask_digest(slot);
                } else {
                    // The final F already unblinded the value.
                    chain.read_digest(slot);
                }
            }

            if !not_last {
                break;
            }
            if k == W as u32 - 2 {
                not_last = false;
            }

            chain.transform(not_last);
            chain.increment_hash_addr();
            k += 1;
        }

        chain.read_digest(&mut pk_buffer[i * n..(i + 1) * n]);
    }

    let leaf = H::t_l(ctx.pub_seed(), &info.pk_adrs, &pk_buffer);
    dest.copy_from_slice(&leaf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_shake::Shake128Hash;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const N: usize = 16;

    #[test]
    fn treehash_matches_recursive_reference() {
        // Leaf oracle: F over a counter byte, no secrets involved.
        let pub_seed = [3u8; N];
        let height = 4usize;

        fn leaf_value(pub_seed: &[u8], idx: u32) -> Vec<u8> {
            let mut adrs = Address::fors_tree(0, 0, 0, 0, idx);
            adrs.set_tree_index(idx);
            let material = [idx as u8; N];
            Shake128Hash::f(pub_seed, &adrs, &material)
        }

        fn reference_node(pub_seed: &[u8], i: u32, z: u32) -> Vec<u8> {
            if z == 0 {
                return leaf_value(pub_seed, i);
            }
            let left = reference_node(pub_seed, 2 * i, z - 1);
            let right = reference_node(pub_seed, 2 * i + 1, z - 1);
            let mut adrs = Address::tree_node(0, 0, z, i);
            adrs.set_tree_height(z);
            adrs.set_tree_index(i);
            Shake128Hash::h(pub_seed, &adrs, &left, &right)
        }

        for leaf_idx in [0u32, 5, 15] {
            let mut root = vec![0u8; N];
            let mut auth = vec![0u8; height * N];
            let mut adrs = Address::tree_node(0, 0, 0, 0);
            treehash::<Shake128Hash, _>(
                &mut root,
                &mut auth,
                &pub_seed,
                leaf_idx,
                0,
                height,
                &mut adrs,
                |out, idx| out.copy_from_slice(&leaf_value(&pub_seed, idx)),
            );

            assert_eq!(root, reference_node(&pub_seed, 0, height as u32));

            // Auth path entries are the siblings along the leaf's path.
            for h in 0..height {
                let sibling = (leaf_idx >> h) ^ 1;
                assert_eq!(
                    auth[h * N..(h + 1) * N],
                    reference_node(&pub_seed, sibling, h as u32)[..],
                    "level {h}"
                );
            }
        }
    }

    #[test]
    fn wots_leaf_matches_unshared_reference() {
        use sha3::{
            digest::{ExtendableOutput, Update, XofReader},
            Shake256,
        };

        const WOTS_LEN: usize = 4;
        const TREE_HEIGHT: usize = 2;

        fn fold(shares: &[u8]) -> Vec<u8> {
            let n = shares.len() / 3;
            (0..n)
                .map(|j| shares[j] ^ shares[n + j] ^ shares[2 * n + j])
                .collect()
        }

        /// Unshared PRF-tree descent, same as the masked core performs.
        fn reference_prf_leaf(
            root: &[u8],
            index: u32,
            n_ext: u32,
            pub_seed: &[u8],
            adrs: &Address,
        ) -> Vec<u8> {
            let mut node = index + (n_ext + 1) / 3;
            let mut stack = Vec::new();
            while node > 0 {
                stack.push(node);
                node = (node - 1) / 4;
            }
            let mut value = root.to_vec();
            for &nd in stack.iter().rev() {
                let mut step = *adrs;
                step.set_prf_index(nd);
                let mut hasher = Shake256::default();
                hasher.update(pub_seed);
                hasher.update(step.as_bytes());
                hasher.update(&value);
                let mut reader = hasher.finalize_xof();
                value = vec![0u8; N];
                reader.read(&mut value);
            }
            value
        }

        let mut rng = ChaCha20Rng::seed_from_u64(40);
        let mut pub_seed = vec![0u8; N];
        rng.fill_bytes(&mut pub_seed);
        let mut sk_shares = vec![0u8; 3 * N];
        rng.fill_bytes(&mut sk_shares);

        let ctx = SigningContext::new(&pub_seed, &sk_shares, 1);
        let layer_key = fold(ctx.merkle_key(0));

        let leaves = 1u32 << TREE_HEIGHT;
        let n_ext = (WOTS_LEN as u32 + 1) * leaves;

        let mut prf_adrs = Address::new();
        prf_adrs.set_type(AdrsType::PrfMerkle);
        let mut iter = PrfIter::new(
            n_ext,
            WOTS_LEN as u32 * leaves,
            ctx.merkle_key(0),
            ctx.pub_seed(),
            prf_adrs,
        );

        // Sign leaf 1 with fixed steps; other leaves are pk-only.
        let steps = vec![0u32, 3, 15, 7];
        let mut wots_sig = vec![0u8; WOTS_LEN * N];
        let mut info = WotsLeafInfo {
            wots_sig: &mut wots_sig,
            wots_sign_leaf: 1,
            wots_steps: steps.clone(),
            leaf_adrs: Address::new(),
            pk_adrs: Address::wots_pk(0, 0, 0),
        };

        for leaf_idx in 0..leaves {
            let mut dest = vec![0u8; N];
            wots_gen_leaf::<Shake128Hash>(&mut dest, &ctx, leaf_idx, &mut info, &mut iter);

            // Rebuild the same leaf without any masking.
            let mut pk_buffer = Vec::new();
            for i in 0..WOTS_LEN {
                let seed = reference_prf_leaf(
                    &layer_key,
                    leaf_idx * WOTS_LEN as u32 + i as u32,
                    n_ext,
                    &pub_seed,
                    &prf_adrs,
                );
                let mut value = seed;
                let mut adrs = Address::wots_hash(0, 0, leaf_idx, i as u32, 0);
                for k in 0..W as u32 - 1 {
                    adrs.set_hash(k);
                    value = Shake128Hash::f(&pub_seed, &adrs, &value);
                    if leaf_idx == 1 && k + 1 == steps[i] {
                        assert_eq!(
                            info.wots_sig[i * N..(i + 1) * N],
                            value[..],
                            "sig chain {i} at step {}",
                            steps[i]
                        );
                    }
                }
                if leaf_idx == 1 && steps[i] == 0 {
                    let expected = reference_prf_leaf(
                        &layer_key,
                        leaf_idx * WOTS_LEN as u32 + i as u32,
                        n_ext,
                        &pub_seed,
                        &prf_adrs,
                    );
                    assert_eq!(info.wots_sig[i * N..(i + 1) * N], expected[..]);
                }
                pk_buffer.extend_from_slice(&value);
            }
            let expected_leaf =
                Shake128Hash::t_l(&pub_seed, &Address::wots_pk(0, 0, leaf_idx), &pk_buffer);
            assert_eq!(dest, expected_leaf, "leaf {leaf_idx}");
        }
    }
}

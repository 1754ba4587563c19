//! Per-signer session context.
//!
//! The context owns every piece of long-lived masked material a signing
//! operation needs: the shared secret seed, one shared PRF-tree root per
//! hypertree layer, and the shared FORS root. The public seed rides along
//! because every hash call absorbs it.
//!
//! The layer keys form a chain: the top layer's key *is* the secret seed,
//! and each layer's key is an external node of the PRF tree one layer
//! above, picked by the hypertree path of the signature being produced.
//! [`SigningContext::prepare_path`] re-derives the whole chain at the
//! start of each signing operation, once `(tree, idx_leaf)` is known.
//!
//! A context is owned by exactly one signer, holds no locks, and wipes all
//! shared buffers when dropped.

use crate::address::{Address, AdrsType};
use crate::keccak::SHARES;
use crate::prf_tree::eval_leaf;
use zeroize::Zeroizing;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// `value >> shift` with a well-defined result for `shift >= 64`, which the
/// top hypertree layer of some parameter sets produces.
fn shiftr(value: u64, shift: usize) -> u64 {
    if shift >= 64 {
        0
    } else {
        value >> shift
    }
}

/// Masked session state for one signer.
pub struct SigningContext {
    pub_seed: Vec<u8>,
    sk_seed: Zeroizing<Vec<u8>>,
    /// Per-layer PRF-tree roots; index 0 is the bottom tree, `d - 1` the
    /// top. 3n bytes each.
    merkle_key: Vec<Zeroizing<Vec<u8>>>,
    fors_seed: Zeroizing<Vec<u8>>,
}

impl SigningContext {
    /// Build a context from the public seed and the 3n-byte shared secret
    /// seed, for a hypertree of `layers` layers.
    ///
    /// The top layer key is fixed to the secret seed here; the remaining
    /// layers stay zero until [`prepare_path`](Self::prepare_path) runs.
    pub fn new(pub_seed: &[u8], sk_seed_shares: &[u8], layers: usize) -> Self {
        debug_assert_eq!(sk_seed_shares.len(), SHARES * pub_seed.len());
        let stride = sk_seed_shares.len();

        let mut merkle_key: Vec<Zeroizing<Vec<u8>>> =
            (0..layers).map(|_| Zeroizing::new(vec![0u8; stride])).collect();
        merkle_key[layers - 1].copy_from_slice(sk_seed_shares);

        SigningContext {
            pub_seed: pub_seed.to_vec(),
            sk_seed: Zeroizing::new(sk_seed_shares.to_vec()),
            merkle_key,
            fors_seed: Zeroizing::new(vec![0u8; stride]),
        }
    }

    /// Digest width in bytes.
    pub fn n(&self) -> usize {
        self.pub_seed.len()
    }

    /// The public seed.
    pub fn pub_seed(&self) -> &[u8] {
        &self.pub_seed
    }

    /// The shared PRF-tree root for one hypertree layer (3n bytes).
    pub fn merkle_key(&self, layer: usize) -> &[u8] {
        &self.merkle_key[layer]
    }

    /// The shared FORS PRF-tree root (3n bytes); valid after
    /// [`prepare_path`](Self::prepare_path).
    pub fn fors_seed(&self) -> &[u8] {
        &self.fors_seed
    }

    /// Derive the per-layer keys and the FORS seed for one hypertree path.
    ///
    /// Walks the layers top-down. At layer `level` the child key is the
    /// external PRF node `leaf + wots_len * 2^tree_height` of that layer's
    /// tree: the node index space of each tree reserves `wots_len` nodes
    /// per Merkle leaf for WOTS chain secrets, plus one trailing node per
    /// leaf for the next layer's seed, so the two uses never collide.
    pub fn prepare_path(
        &mut self,
        tree: u64,
        idx_leaf: u32,
        full_height: usize,
        tree_height: usize,
        wots_len: usize,
    ) {
        let layers = self.merkle_key.len();
        let stride = self.sk_seed.len();
        let leaves = 1u32 << tree_height;
        let n_ext = (wots_len as u32 + 1) * leaves;

        // Top tree root key is the master seed.
        self.merkle_key[layers - 1].copy_from_slice(&self.sk_seed);

        let mut parent = Zeroizing::new(self.sk_seed.to_vec());
        let mut child = Zeroizing::new(vec![0u8; stride]);
        for level in (0..layers).rev() {
            let tree_shift = full_height - (layers - level) * tree_height;

            let mut adrs = Address::new();
            adrs.set_type(AdrsType::PrfMerkle);
            adrs.set_layer(level as u32);
            adrs.set_tree(shiftr(tree, tree_shift));

            let leaf = if level == 0 {
                idx_leaf
            } else {
                (shiftr(tree, tree_shift - tree_height) & u64::from(leaves - 1)) as u32
            };

            eval_leaf(
                &mut child,
                &parent,
                leaf + wots_len as u32 * leaves,
                n_ext,
                &self.pub_seed,
                &mut adrs,
            );

            if level == 0 {
                self.fors_seed.copy_from_slice(&child);
            } else {
                self.merkle_key[level - 1].copy_from_slice(&child);
            }
            parent.copy_from_slice(&child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use sha3::{
        digest::{ExtendableOutput, Update, XofReader},
        Shake256,
    };

    const N: usize = 16;
    const FULL_HEIGHT: usize = 6;
    const TREE_HEIGHT: usize = 3;
    const LAYERS: usize = 2;
    const WOTS_LEN: usize = 5;

    fn fold(shares: &[u8]) -> Vec<u8> {
        let n = shares.len() / 3;
        (0..n)
            .map(|j| shares[j] ^ shares[n + j] ^ shares[2 * n + j])
            .collect()
    }

    /// Unshared reference for a single PRF-tree descent.
    fn reference_leaf(root: &[u8], index: u32, n_ext: u32, pub_seed: &[u8], adrs: &Address) -> Vec<u8> {
        let mut node = index + (n_ext + 1) / 3;
        let mut stack = Vec::new();
        while node > 0 {
            stack.push(node);
            node = (node - 1) / 4;
        }
        let mut value = root.to_vec();
        for &nd in stack.iter().rev() {
            let mut step_adrs = *adrs;
            step_adrs.set_prf_index(nd);
            let mut hasher = Shake256::default();
            hasher.update(pub_seed);
            hasher.update(step_adrs.as_bytes());
            hasher.update(&value);
            let mut reader = hasher.finalize_xof();
            value = vec![0u8; N];
            reader.read(&mut value);
        }
        value
    }

    /// Unshared reference for the whole key schedule.
    fn reference_schedule(
        sk_seed: &[u8],
        pub_seed: &[u8],
        tree: u64,
        idx_leaf: u32,
    ) -> (Vec<Vec<u8>>, Vec<u8>) {
        let leaves = 1u32 << TREE_HEIGHT;
        let n_ext = (WOTS_LEN as u32 + 1) * leaves;
        let mut keys = vec![Vec::new(); LAYERS];
        keys[LAYERS - 1] = sk_seed.to_vec();

        let mut parent = sk_seed.to_vec();
        let mut fors = Vec::new();
        for level in (0..LAYERS).rev() {
            let tree_shift = FULL_HEIGHT - (LAYERS - level) * TREE_HEIGHT;
            let mut adrs = Address::new();
            adrs.set_type(AdrsType::PrfMerkle);
            adrs.set_layer(level as u32);
            adrs.set_tree(tree >> tree_shift);
            let leaf = if level == 0 {
                idx_leaf
            } else {
                ((tree >> (tree_shift - TREE_HEIGHT)) & u64::from(leaves - 1)) as u32
            };
            let child = reference_leaf(
                &parent,
                leaf + WOTS_LEN as u32 * leaves,
                n_ext,
                pub_seed,
                &adrs,
            );
            if level == 0 {
                fors = child.clone();
            } else {
                keys[level - 1] = child.clone();
            }
            parent = child;
        }
        (keys, fors)
    }

    #[test]
    fn schedule_matches_unshared_reference() {
        let mut rng = ChaCha20Rng::seed_from_u64(30);
        let mut pub_seed = vec![0u8; N];
        rng.fill_bytes(&mut pub_seed);
        let mut sk_shares = vec![0u8; 3 * N];
        rng.fill_bytes(&mut sk_shares);
        let sk_logical = fold(&sk_shares);

        let mut ctx = SigningContext::new(&pub_seed, &sk_shares, LAYERS);

        for (tree, idx_leaf) in [
            (0u64, 0u32),
            (0, 7),
            (1, 0),
            (3, 5),
            (5, 2),
            (6, 6),
            (7, 1),
            (7, 7),
        ] {
            ctx.prepare_path(tree, idx_leaf, FULL_HEIGHT, TREE_HEIGHT, WOTS_LEN);
            let (keys, fors) = reference_schedule(&sk_logical, &pub_seed, tree, idx_leaf);

            for layer in 0..LAYERS {
                assert_eq!(
                    fold(ctx.merkle_key(layer)),
                    keys[layer],
                    "layer {layer}, tree {tree}, leaf {idx_leaf}"
                );
            }
            assert_eq!(fold(ctx.fors_seed()), fors);
        }
    }

    #[test]
    fn different_maskings_yield_the_same_logical_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        let pub_seed = vec![4u8; N];
        let mut shares_a = vec![0u8; 3 * N];
        rng.fill_bytes(&mut shares_a);

        let logical = fold(&shares_a);
        let mut shares_b = vec![0u8; 3 * N];
        rng.fill_bytes(&mut shares_b[N..]);
        for j in 0..N {
            shares_b[j] = logical[j] ^ shares_b[N + j] ^ shares_b[2 * N + j];
        }

        let mut ctx_a = SigningContext::new(&pub_seed, &shares_a, LAYERS);
        let mut ctx_b = SigningContext::new(&pub_seed, &shares_b, LAYERS);
        ctx_a.prepare_path(4, 3, FULL_HEIGHT, TREE_HEIGHT, WOTS_LEN);
        ctx_b.prepare_path(4, 3, FULL_HEIGHT, TREE_HEIGHT, WOTS_LEN);

        assert_eq!(fold(ctx_a.fors_seed()), fold(ctx_b.fors_seed()));
        assert_eq!(fold(ctx_a.merkle_key(0)), fold(ctx_b.merkle_key(0)));
    }
}

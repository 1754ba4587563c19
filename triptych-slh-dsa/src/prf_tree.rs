//! Masked PRF tree.
//!
//! WOTS+ and FORS secret values are not derived with the flat
//! `PRF(PK.seed, SK.seed, ADRS)` of FIPS 205. Instead each Merkle tree and
//! each FORS forest owns a 4-ary hash tree rooted in a masked seed: every
//! edge is one masked SHAKE256 evaluation over
//! `PK.seed || ADRS || parent`, with the parent value in 3-share form and
//! shared output requested from the permutation. The tree's *external*
//! nodes — the first layer wide enough to hold one node per consumer — are
//! the per-chain secrets, and they never exist unmasked.
//!
//! Nodes are numbered in the canonical 4-ary order: the root is 0 and the
//! children of node `i` are `4i+1 ..= 4i+4`. For a tree with `n_ext`
//! external nodes, external index `j` lives at internal index
//! `j + (n_ext + 1) / 3`.
//!
//! Two access patterns are provided: [`eval_leaf`] derives a single
//! external node by walking down from the root, and [`PrfIter`] produces
//! all external nodes in index order while caching the interior nodes on
//! the current path, so a full sweep costs roughly one hash per node
//! visited rather than one path per leaf.
//!
//! Index order is not left-to-right leaf order unless `n_ext` is a power
//! of four: the external layer can get one level deeper partway through
//! the sweep, which the iterator handles by growing its path.

use crate::address::Address;
use crate::chain::fill_f_block;
use crate::keccak::{self, SHARES, STATE_LANES};
use zeroize::{Zeroize, Zeroizing};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Deepest path the iterator can track; covers trees of up to 2^19
/// external nodes, far beyond any parameter set in use.
const MAX_DEPTH: usize = 12;

/// One masked PRF edge: SHAKE256 over `PK.seed || ADRS || parent` with a
/// 3-share parent and 3-share output.
///
/// `out` and `parent` are `3n`-byte shared digests and must not alias.
pub fn node_hash(out: &mut [u8], pub_seed: &[u8], adrs: &Address, parent: &[u8]) {
    let n = pub_seed.len();
    let lanes_n = n / 8;
    debug_assert_eq!(out.len(), SHARES * n);

    let mut lanes = [0u64; STATE_LANES];
    fill_f_block(&mut lanes, pub_seed, adrs, parent);
    let result = keccak::permute(&lanes, true);
    for share in 0..SHARES {
        keccak::lanes_to_bytes(&mut out[share * n..(share + 1) * n], &result[share][..lanes_n]);
    }
    lanes.zeroize();
}

/// Derive one external node of a PRF tree by descending from the root.
///
/// `root` is the tree's 3n-byte shared seed, `index` the external index
/// and `n_ext` the number of external nodes. The PRF-index field of `adrs`
/// is rewritten at every level; all other fields are the caller's.
pub fn eval_leaf(
    out: &mut [u8],
    root: &[u8],
    index: u32,
    n_ext: u32,
    pub_seed: &[u8],
    adrs: &mut Address,
) {
    let mut node = index + (n_ext + 1) / 3;

    // Path to the root, recorded bottom-up.
    let mut stack = [0u32; MAX_DEPTH];
    let mut sp = 0;
    while node > 0 {
        stack[sp] = node;
        sp += 1;
        node = (node - 1) / 4;
    }

    // Replay it top-down, one masked hash per level.
    let mut parent = Zeroizing::new(root.to_vec());
    for level in (0..sp).rev() {
        adrs.set_prf_index(stack[level]);
        node_hash(out, pub_seed, adrs, &parent);
        parent.copy_from_slice(out);
    }
    if sp == 0 {
        // Degenerate single-node tree: the external node is the root.
        out.copy_from_slice(root);
    }
}

/// In-order sweep over the external nodes of a PRF tree.
///
/// The iterator keeps the shared value of every interior node on the path
/// to the current external node. Advancing to the next node re-hashes only
/// the levels whose index changed — a base-4 counter increment over the
/// path, with one extra twist: when the external layer deepens mid-sweep
/// (possible because nodes are visited in index order), the path grows by
/// one level.
pub struct PrfIter<'a> {
    pub_seed: &'a [u8],
    adrs: Address,
    min_node: u32,
    stop_node: i64,
    cur_node: i64,
    num_node: usize,
    node: [u32; MAX_DEPTH],
    count: [u8; MAX_DEPTH],
    /// Path-cache of shared node values, `3n` bytes per level.
    values: Zeroizing<Vec<u8>>,
    stride: usize,
}

impl<'a> PrfIter<'a> {
    /// Position a fresh iterator on external node 0.
    ///
    /// `n_ext` is the number of external nodes; the sweep ends after
    /// emitting external index `stop_value`. `seed` is the 3n-byte shared
    /// root; `adrs` is captured by value, so the caller's copy stays
    /// untouched while the iteration runs.
    pub fn new(
        n_ext: u32,
        stop_value: u32,
        seed: &[u8],
        pub_seed: &'a [u8],
        adrs: Address,
    ) -> Self {
        let n = pub_seed.len();
        let stride = SHARES * n;
        let min_node = (n_ext + 1) / 3;

        let mut iter = PrfIter {
            pub_seed,
            adrs,
            min_node,
            stop_node: i64::from(stop_value) + i64::from(min_node),
            cur_node: i64::from(min_node),
            num_node: 0,
            node: [0; MAX_DEPTH],
            count: [0; MAX_DEPTH],
            values: Zeroizing::new(vec![0u8; MAX_DEPTH * stride]),
            stride,
        };

        // Path to the first external node, bottom-up.
        let mut stack = [0u32; MAX_DEPTH];
        let mut sp = 0;
        let mut i = min_node;
        while i > 0 {
            stack[sp] = i;
            sp += 1;
            i = (i - 1) / 4;
        }

        // The root holds the seed as-is.
        iter.values[..stride].copy_from_slice(seed);

        // Fill in the path top-down.
        for (level, stack_pos) in (1..=sp).zip((0..sp).rev()) {
            let nd = stack[stack_pos];
            iter.node[level] = nd;
            iter.count[level] = ((nd + 3) % 4) as u8;
            iter.hash_level(level);
        }

        iter.num_node = sp + 1;
        iter
    }

    /// Re-derive the cached value at `level` from its parent level.
    fn hash_level(&mut self, level: usize) {
        self.adrs.set_prf_index(self.node[level]);
        let stride = self.stride;
        let (parents, rest) = self.values.split_at_mut(level * stride);
        node_hash(
            &mut rest[..stride],
            self.pub_seed,
            &self.adrs,
            &parents[(level - 1) * stride..],
        );
    }

    /// Emit the next external node into `out` (3n bytes) and return its
    /// external index, or `None` once the sweep is done.
    pub fn next(&mut self, out: &mut [u8]) -> Option<u32> {
        if self.cur_node < 0 {
            return None;
        }

        // The value for the current node was prepared on the previous call.
        let index = (self.cur_node - i64::from(self.min_node)) as u32;
        let bottom = (self.num_node - 1) * self.stride;
        out.copy_from_slice(&self.values[bottom..bottom + self.stride]);

        if self.cur_node == self.stop_node {
            self.cur_node = -1;
        } else {
            // Advance the base-4 path counter: find the deepest level that
            // can still step to a sibling.
            let mut level = self.num_node;
            loop {
                if level == 0 {
                    break;
                }
                level -= 1;
                if self.count[level] < 3 {
                    break;
                }
            }

            if level > 0 {
                self.count[level] += 1;
                self.node[level] += 1;
                self.hash_level(level);
            } else {
                // Every level was saturated: the external layer just got
                // one level deeper. Grow the path; the reset loop below
                // fills in the new bottom.
                self.num_node += 1;
            }

            // Reset everything below the stepped level to its first child.
            let mut reset = level + 1;
            while reset < self.num_node {
                self.count[reset] = 0;
                self.node[reset] = 4 * self.node[reset - 1] + 1;
                self.hash_level(reset);
                reset += 1;
            }

            self.cur_node += 1;
        }

        Some(index)
    }
}

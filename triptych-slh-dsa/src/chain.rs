//! Masked F evaluation over a persistent chain state.
//!
//! A WOTS+ chain applies the tweakable hash F up to `w - 1` times to the
//! same n-byte value, with only the hash-address field of the ADRS changing
//! between steps. Instead of re-absorbing `PK.seed || ADRS || value` from
//! bytes on every step, the signer keeps a pre-packed 75-lane SHAKE256
//! block — the *chain state* — and mutates it in place: the permutation
//! output is copied back into the running-value window and the hash address
//! is bumped directly inside the packed ADRS lanes.
//!
//! Only the running value is secret, so only its lane window is actively
//! shared across the three planes. `PK.seed`, the ADRS and the SHAKE
//! padding are public and live in plane 0 alone; planes 1 and 2 are zero
//! there, which leaves the logical state intact under the XOR convention.

use crate::address::Address;
use crate::keccak::{self, PLANE_LANES, SHARES, STATE_LANES};
use zeroize::Zeroize;

/// Lanes occupied by the 32-byte ADRS inside the rate.
const ADRS_LANES: usize = 4;

/// ADRS byte holding the low-order byte of the hash-address word.
/// WOTS hash addresses stay below 2^8 (w = 16), so stepping the chain is a
/// single in-lane add with no carry into neighbouring fields.
const HASH_ADDR_BYTE: usize = 31;

/// Pack a single-permutation SHAKE256 block for one F or PRF evaluation.
///
/// Layout in lanes, per the chain-state convention:
/// `[0 .. N)` PK.seed (plane 0 only), `[N .. N+4)` ADRS (plane 0 only),
/// `[N+4 .. N+4+N)` the masked input, replicated across the three planes at
/// stride 25. The SHAKE256 domain marker `0x1f` follows the input and the
/// final bit of the 136-byte rate is set in lane 16.
///
/// Returns the lane offset of the running-value window.
pub(crate) fn fill_f_block(
    lanes: &mut [u64; STATE_LANES],
    pub_seed: &[u8],
    adrs: &Address,
    input_shares: &[u8],
) -> usize {
    let n = pub_seed.len();
    let lanes_n = n / 8;
    debug_assert_eq!(input_shares.len(), SHARES * n);

    lanes.fill(0);
    keccak::bytes_to_lanes(&mut lanes[..lanes_n], pub_seed);
    keccak::bytes_to_lanes(&mut lanes[lanes_n..lanes_n + ADRS_LANES], adrs.as_bytes());
    for share in 0..SHARES {
        let base = PLANE_LANES * share + lanes_n + ADRS_LANES;
        keccak::bytes_to_lanes(
            &mut lanes[base..base + lanes_n],
            &input_shares[share * n..(share + 1) * n],
        );
    }

    // SHAKE256 padding; the permutation itself is padding-agnostic.
    lanes[lanes_n + ADRS_LANES + lanes_n] = 0x1f;
    lanes[16] ^= 1 << 63;

    lanes_n + ADRS_LANES
}

/// A pre-packed masked SHAKE256 block, reused across the F evaluations of
/// one Winternitz chain.
#[derive(Zeroize)]
pub struct ChainState {
    lanes: [u64; STATE_LANES],
    digest_lanes: usize,
}

impl ChainState {
    /// Build the chain state for a fresh chain.
    ///
    /// `input_shares` is the 3n-byte masked chain input (normally a PRF
    /// tree leaf); `adrs` must already carry the chain's WOTS address with
    /// hash address 0.
    pub fn new(pub_seed: &[u8], adrs: &Address, input_shares: &[u8]) -> Self {
        let mut lanes = [0u64; STATE_LANES];
        fill_f_block(&mut lanes, pub_seed, adrs, input_shares);
        ChainState {
            lanes,
            digest_lanes: pub_seed.len() / 8,
        }
    }

    fn hash_offset(&self) -> usize {
        self.digest_lanes + ADRS_LANES
    }

    /// Step the hash-address field of the packed ADRS by one.
    ///
    /// ADRS is public and lives in plane 0 only, so this touches one lane.
    pub fn increment_hash_addr(&mut self) {
        let lane = self.digest_lanes + HASH_ADDR_BYTE / 8;
        self.lanes[lane] = self.lanes[lane].wrapping_add(1u64 << (8 * (HASH_ADDR_BYTE % 8)));
    }

    /// Apply F once: run the masked permutation over the block and write
    /// the digest back into the running-value window.
    ///
    /// With `keep_blinded` the result stays in 3-share form and the chain
    /// can keep going; without it the digest lands unshared in plane 0 and
    /// the mask windows go stale — this must be the chain's final F.
    pub fn transform(&mut self, keep_blinded: bool) {
        let out = keccak::permute(&self.lanes, keep_blinded);
        let off = self.hash_offset();
        let nl = self.digest_lanes;
        self.lanes[off..off + nl].copy_from_slice(&out[0][..nl]);
        if keep_blinded {
            for share in 1..SHARES {
                let base = PLANE_LANES * share + off;
                self.lanes[base..base + nl].copy_from_slice(&out[share][..nl]);
            }
        }
    }

    /// Serialise the unshared running value (valid after a transform with
    /// `keep_blinded = false`).
    pub fn read_digest(&self, out: &mut [u8]) {
        let off = self.hash_offset();
        keccak::lanes_to_bytes(out, &self.lanes[off..off + self.digest_lanes]);
    }

    /// Fold the three shares of the running value and serialise the result.
    /// Used when a still-masked chain value has to enter the signature.
    pub fn unmask_digest(&self, out: &mut [u8]) {
        let off = self.hash_offset();
        let mut folded = [0u64; 4];
        for m in 0..self.digest_lanes {
            folded[m] = self.lanes[off + m]
                ^ self.lanes[PLANE_LANES + off + m]
                ^ self.lanes[2 * PLANE_LANES + off + m];
        }
        keccak::lanes_to_bytes(out, &folded[..self.digest_lanes]);
    }
}

impl Drop for ChainState {
    fn drop(&mut self) {
        self.zeroize();
    }
}

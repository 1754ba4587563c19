//! Masked Keccak-f[1600] permutation.
//!
//! The signing pipeline never feeds secret material to an off-the-shelf
//! SHAKE implementation. Instead it carries secrets as three XOR shares and
//! runs them through this permutation, which operates on a 3-plane state:
//! the logical 25-lane Keccak state is `S0 ^ S1 ^ S2`, lane by lane.
//!
//! A full permutation does not keep all 24 rounds in shared form. The first
//! [`BLINDED_ROUNDS`] rounds run on the shared state; the two mask planes
//! are then folded into the primary plane and the bulk of the rounds run on
//! the unshared state, which is sound because those rounds only ever see
//! values that are already the output of several rounds of mixing. When the
//! caller needs shared output, the state is re-expanded for the final
//! [`BLINDED_ROUNDS`] rounds: folding S1 and S2 in a second time restores
//! the primary plane to a share, with the thoroughly diffused S1 and S2
//! standing in as its masks.
//!
//! Only the first four lanes of the final state are ever emitted; a digest
//! is at most 32 bytes for every supported parameter set.

use zeroize::Zeroize;

/// Lanes per state plane.
pub const PLANE_LANES: usize = 25;

/// Number of shares in the masked representation.
pub const SHARES: usize = 3;

/// Total lanes in a masked state: three 25-lane planes.
pub const STATE_LANES: usize = SHARES * PLANE_LANES;

/// Lanes emitted per plane by the permutation.
pub const OUTPUT_LANES: usize = 4;

/// Rounds executed on the shared state at the start of the permutation
/// (and again at the end when shared output is requested). 2 and 3 are
/// supported; the output is identical for both.
pub const BLINDED_ROUNDS: usize = 3;

const NROUNDS: usize = 24;

/// Keccak round constants.
const ROUND_CONSTANTS: [u64; NROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rotation offsets for the rho step, in pi traversal order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane traversal order for the pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// The linear half of a round: theta, rho and pi on one plane.
///
/// Linear steps commute with the XOR sharing, so the shared round applies
/// this to each plane independently.
fn theta_rho_pi(a: &mut [u64; PLANE_LANES]) {
    // theta
    let mut bc = [0u64; 5];
    for x in 0..5 {
        bc[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }
    for x in 0..5 {
        let d = bc[(x + 4) % 5] ^ bc[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            a[x + 5 * y] ^= d;
        }
    }

    // rho and pi, walking the lane permutation cycle
    let mut last = a[1];
    for i in 0..24 {
        let lane = PI[i];
        let tmp = a[lane];
        a[lane] = last.rotate_left(RHO[i]);
        last = tmp;
    }
}

/// One round of Keccak-f[1600] on an unshared 25-lane state.
fn round_unshared(a: &mut [u64; PLANE_LANES], rc: u64) {
    theta_rho_pi(a);

    // chi, classic form
    for y in 0..5 {
        let mut row = [0u64; 5];
        row.copy_from_slice(&a[5 * y..5 * y + 5]);
        for x in 0..5 {
            a[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }

    // iota
    a[0] ^= rc;
}

/// One round of Keccak-f[1600] on a 3-share state.
///
/// The nonlinear chi step is the only place the shares interact. For a
/// shared pair `(a, b)` the term `!a & b` expands into nine cross terms
/// `!a_i & b_j`, and the term for pair `(i, j)` is accumulated into output
/// share `(j - i) mod 3`. With uniformly random input masks, no single
/// output share is correlated with the logical value.
///
/// The round constant is folded into share 0 only; it touches a single
/// lane, so injecting it into one share preserves the XOR sum.
fn round_shared(s: &mut [[u64; PLANE_LANES]; SHARES], rc: u64) {
    for plane in s.iter_mut() {
        theta_rho_pi(plane);
    }

    // chi with cross-share terms, one row at a time
    for y in 0..5 {
        let mut rows = [[0u64; 5]; SHARES];
        for (row, plane) in rows.iter_mut().zip(s.iter()) {
            row.copy_from_slice(&plane[5 * y..5 * y + 5]);
        }
        for x in 0..5 {
            let e = (x + 1) % 5;
            let i = (x + 2) % 5;
            for k in 0..SHARES {
                s[k][5 * y + x] = rows[k][x]
                    ^ (!rows[0][e] & rows[k][i])
                    ^ (!rows[1][e] & rows[(k + 1) % 3][i])
                    ^ (!rows[2][e] & rows[(k + 2) % 3][i]);
            }
        }
    }

    s[0][0] ^= rc;
}

/// Run the full 24-round permutation on a masked state, with the default
/// number of blinded rounds.
///
/// `state` is three 25-lane planes, share `k` occupying lanes
/// `25k..25k+25`. The return value holds the first four lanes of each
/// output plane; when `shared_output` is false only plane 0 is meaningful
/// (it carries the full unshared result) and planes 1 and 2 are zero.
pub fn permute(state: &[u64; STATE_LANES], shared_output: bool) -> [[u64; OUTPUT_LANES]; SHARES] {
    permute_rounds(state, shared_output, BLINDED_ROUNDS)
}

/// [`permute`] with an explicit blinded-round count (2 or 3).
///
/// The output is bitwise identical for both supported counts; the knob only
/// moves the boundary between shared and unshared rounds.
pub fn permute_rounds(
    state: &[u64; STATE_LANES],
    shared_output: bool,
    blinded_rounds: usize,
) -> [[u64; OUTPUT_LANES]; SHARES] {
    debug_assert!(blinded_rounds == 2 || blinded_rounds == 3);

    let mut s = [[0u64; PLANE_LANES]; SHARES];
    for (k, plane) in s.iter_mut().enumerate() {
        plane.copy_from_slice(&state[PLANE_LANES * k..PLANE_LANES * (k + 1)]);
    }

    let mut round = 0;

    // Blinded prefix: the state stays in 3-share form.
    for _ in 0..blinded_rounds {
        round_shared(&mut s, ROUND_CONSTANTS[round]);
        round += 1;
    }

    // Collapse: fold the mask planes into the primary plane, leaving the
    // unshared logical state in plane 0. Planes 1 and 2 are left alone.
    for i in 0..PLANE_LANES {
        s[0][i] ^= s[1][i] ^ s[2][i];
    }

    // Unshared middle rounds.
    let suffix = if shared_output { blinded_rounds } else { 0 };
    let middle = NROUNDS - blinded_rounds - suffix;
    for _ in 0..middle {
        round_unshared(&mut s[0], ROUND_CONSTANTS[round]);
        round += 1;
    }

    if shared_output {
        // Expand: the same fold, run a second time, turns plane 0 back
        // into a share of the logical state, with the untouched (and by
        // now thoroughly diffused) planes 1 and 2 acting as its masks.
        for i in 0..PLANE_LANES {
            s[0][i] ^= s[1][i] ^ s[2][i];
        }
        for _ in 0..blinded_rounds {
            round_shared(&mut s, ROUND_CONSTANTS[round]);
            round += 1;
        }
    }

    debug_assert_eq!(round, NROUNDS);

    let mut out = [[0u64; OUTPUT_LANES]; SHARES];
    out[0].copy_from_slice(&s[0][..OUTPUT_LANES]);
    if shared_output {
        out[1].copy_from_slice(&s[1][..OUTPUT_LANES]);
        out[2].copy_from_slice(&s[2][..OUTPUT_LANES]);
    }

    s.zeroize();
    out
}

/// Pack little-endian bytes into 64-bit lanes. `src.len()` must be
/// `8 * dst.len()`.
pub fn bytes_to_lanes(dst: &mut [u64], src: &[u8]) {
    debug_assert_eq!(src.len(), 8 * dst.len());
    for (lane, chunk) in dst.iter_mut().zip(src.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *lane = u64::from_le_bytes(bytes);
    }
}

/// Unpack 64-bit lanes into little-endian bytes. `dst.len()` must be
/// `8 * src.len()`.
pub fn lanes_to_bytes(dst: &mut [u8], src: &[u64]) {
    debug_assert_eq!(dst.len(), 8 * src.len());
    for (chunk, lane) in dst.chunks_exact_mut(8).zip(src.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_shared_state(rng: &mut ChaCha20Rng) -> [u64; STATE_LANES] {
        let mut state = [0u64; STATE_LANES];
        for lane in state.iter_mut() {
            *lane = rng.next_u64();
        }
        state
    }

    fn logical_state(state: &[u64; STATE_LANES]) -> [u64; PLANE_LANES] {
        let mut logical = [0u64; PLANE_LANES];
        for i in 0..PLANE_LANES {
            logical[i] = state[i] ^ state[i + 25] ^ state[i + 50];
        }
        logical
    }

    /// Reference: 24 plain rounds on the unshared state.
    fn plain_permutation(mut a: [u64; PLANE_LANES]) -> [u64; OUTPUT_LANES] {
        for rc in ROUND_CONSTANTS {
            round_unshared(&mut a, rc);
        }
        let mut out = [0u64; OUTPUT_LANES];
        out.copy_from_slice(&a[..OUTPUT_LANES]);
        out
    }

    #[test]
    fn unshared_output_matches_plain_permutation() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..8 {
            let state = random_shared_state(&mut rng);
            let expected = plain_permutation(logical_state(&state));

            let out = permute(&state, false);
            assert_eq!(out[0], expected);
            assert_eq!(out[1], [0u64; OUTPUT_LANES]);
            assert_eq!(out[2], [0u64; OUTPUT_LANES]);
        }
    }

    #[test]
    fn shared_output_reconstructs_to_plain_permutation() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..8 {
            let state = random_shared_state(&mut rng);
            let expected = plain_permutation(logical_state(&state));

            let out = permute(&state, true);
            for i in 0..OUTPUT_LANES {
                assert_eq!(out[0][i] ^ out[1][i] ^ out[2][i], expected[i]);
            }
        }
    }

    #[test]
    fn output_is_independent_of_blinded_round_count() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for shared_output in [false, true] {
            let state = random_shared_state(&mut rng);
            let two = permute_rounds(&state, shared_output, 2);
            let three = permute_rounds(&state, shared_output, 3);
            if shared_output {
                // Individual shares may differ; the logical value may not.
                for i in 0..OUTPUT_LANES {
                    assert_eq!(
                        two[0][i] ^ two[1][i] ^ two[2][i],
                        three[0][i] ^ three[1][i] ^ three[2][i]
                    );
                }
            } else {
                assert_eq!(two, three);
            }
        }
    }

    #[test]
    fn masking_does_not_change_the_logical_output() {
        // Two different sharings of the same logical state must agree.
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let state_a = random_shared_state(&mut rng);

        let mut state_b = [0u64; STATE_LANES];
        for i in 0..PLANE_LANES {
            let m1 = rng.next_u64();
            let m2 = rng.next_u64();
            let logical = state_a[i] ^ state_a[i + 25] ^ state_a[i + 50];
            state_b[i] = logical ^ m1 ^ m2;
            state_b[i + 25] = m1;
            state_b[i + 50] = m2;
        }

        assert_eq!(permute(&state_a, false), permute(&state_b, false));
    }

    #[test]
    fn share_fold_is_self_inverse() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let state = random_shared_state(&mut rng);

        let mut folded = state;
        for i in 0..PLANE_LANES {
            folded[i] ^= folded[i + 25] ^ folded[i + 50];
        }
        // Folding a second time restores the original primary plane.
        let mut refolded = folded;
        for i in 0..PLANE_LANES {
            refolded[i] ^= refolded[i + 25] ^ refolded[i + 50];
        }
        assert_eq!(refolded, state);
    }

    #[test]
    fn lane_packing_round_trips() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let mut lanes = [0u64; 4];
        bytes_to_lanes(&mut lanes, &bytes);
        assert_eq!(lanes[0], 0x0706050403020100);

        let mut back = [0u8; 32];
        lanes_to_bytes(&mut back, &lanes);
        assert_eq!(back[..], bytes[..]);
    }
}

//! SLH-DSA-SHAKE parameter sets.
//!
//! The six "simple" SHAKE-based parameter sets of FIPS 205 are defined
//! here: SHAKE-128s/f, SHAKE-192s/f, SHAKE-256s/f. The 's' variants have
//! smaller signatures but slower signing; the 'f' variants sign faster at
//! the cost of larger signatures.
//!
//! Public keys and signatures use the FIPS 205 sizes. The secret key does
//! not: the secret seed is stored as its three masking shares (3n bytes),
//! so a secret key is `3n + n + n + n = 6n` bytes.

/// Common parameters shared across all SLH-DSA variants.
pub mod common {
    /// Winternitz parameter (always 16 for SLH-DSA).
    pub const W: usize = 16;

    /// Log2 of Winternitz parameter.
    pub const LG_W: usize = 4;

    /// Address size in bytes.
    pub const ADRS_BYTES: usize = 32;
}

/// Trait for SLH-DSA parameter sets.
pub trait Params {
    /// Security parameter n (hash output length in bytes).
    const N: usize;

    /// Height of each XMSS tree (h' = h/d).
    const H_PRIME: usize;

    /// Total Hypertree height.
    const H: usize;

    /// Number of Hypertree layers.
    const D: usize;

    /// FORS tree height.
    const A: usize;

    /// Number of FORS trees.
    const K: usize;

    /// WOTS+ len1 = ceil(8n / lg(w)).
    const WOTS_LEN1: usize;

    /// WOTS+ len2 = floor(lg(len1 * (w-1)) / lg(w)) + 1.
    const WOTS_LEN2: usize;

    /// Total WOTS+ signature length: len = len1 + len2.
    const WOTS_LEN: usize = Self::WOTS_LEN1 + Self::WOTS_LEN2;

    /// Public key size in bytes.
    const PK_BYTES: usize = 2 * Self::N;

    /// Secret key size in bytes: the shared seed (3n) plus SK.prf,
    /// PK.seed and PK.root.
    const SK_BYTES: usize = 6 * Self::N;

    /// Signature size in bytes.
    /// SIG = R (n bytes) + SIG_FORS + SIG_HT
    /// SIG_FORS = k * (a+1) * n bytes
    /// SIG_HT = (h + d * len) * n bytes
    const SIG_BYTES: usize = Self::N
        + Self::K * (Self::A + 1) * Self::N
        + (Self::H + Self::D * Self::WOTS_LEN) * Self::N;

    /// Tree address bits.
    const TREE_BITS: usize = Self::H - Self::H_PRIME;

    /// Leaf address bits.
    const LEAF_BITS: usize = Self::H_PRIME;
}

macro_rules! define_params {
    (
        $(#[$doc:meta])*
        $mod_name:ident, $marker:ident,
        n = $n:expr, h_prime = $h_prime:expr, h = $h:expr, d = $d:expr,
        a = $a:expr, k = $k:expr, wots_len1 = $len1:expr, wots_len2 = $len2:expr
    ) => {
        $(#[$doc])*
        pub mod $mod_name {
            pub use super::common::*;

            /// Security parameter in bytes.
            pub const N: usize = $n;
            /// XMSS tree height.
            pub const H_PRIME: usize = $h_prime;
            /// Total hypertree height.
            pub const H: usize = $h;
            /// Number of hypertree layers.
            pub const D: usize = $d;
            /// FORS tree height.
            pub const A: usize = $a;
            /// Number of FORS trees.
            pub const K: usize = $k;
            /// WOTS+ len1.
            pub const WOTS_LEN1: usize = $len1;
            /// WOTS+ len2.
            pub const WOTS_LEN2: usize = $len2;
            /// WOTS+ total length.
            pub const WOTS_LEN: usize = WOTS_LEN1 + WOTS_LEN2;
            /// Public key size.
            pub const PK_BYTES: usize = 2 * N;
            /// Secret key size (shared seed + sk_prf + pk_seed + pk_root).
            pub const SK_BYTES: usize = 6 * N;
            /// Signature size.
            pub const SIG_BYTES: usize = N + K * (A + 1) * N + (H + D * WOTS_LEN) * N;

            /// Parameter set marker type.
            pub struct $marker;

            impl super::Params for $marker {
                const N: usize = N;
                const H_PRIME: usize = H_PRIME;
                const H: usize = H;
                const D: usize = D;
                const A: usize = A;
                const K: usize = K;
                const WOTS_LEN1: usize = WOTS_LEN1;
                const WOTS_LEN2: usize = WOTS_LEN2;
            }
        }
    };
}

define_params!(
    /// SLH-DSA-SHAKE-128s parameters (NIST level 1, small signatures).
    #[cfg(feature = "slh-dsa-shake-128s")]
    slh_dsa_shake_128s, Params128s,
    n = 16, h_prime = 9, h = 63, d = 7, a = 12, k = 14, wots_len1 = 32, wots_len2 = 3
);

define_params!(
    /// SLH-DSA-SHAKE-128f parameters (NIST level 1, fast signing).
    #[cfg(feature = "slh-dsa-shake-128f")]
    slh_dsa_shake_128f, Params128f,
    n = 16, h_prime = 3, h = 66, d = 22, a = 6, k = 33, wots_len1 = 32, wots_len2 = 3
);

define_params!(
    /// SLH-DSA-SHAKE-192s parameters (NIST level 3, small signatures).
    #[cfg(feature = "slh-dsa-shake-192s")]
    slh_dsa_shake_192s, Params192s,
    n = 24, h_prime = 9, h = 63, d = 7, a = 14, k = 17, wots_len1 = 48, wots_len2 = 3
);

define_params!(
    /// SLH-DSA-SHAKE-192f parameters (NIST level 3, fast signing).
    #[cfg(feature = "slh-dsa-shake-192f")]
    slh_dsa_shake_192f, Params192f,
    n = 24, h_prime = 3, h = 66, d = 22, a = 8, k = 33, wots_len1 = 48, wots_len2 = 3
);

define_params!(
    /// SLH-DSA-SHAKE-256s parameters (NIST level 5, small signatures).
    #[cfg(feature = "slh-dsa-shake-256s")]
    slh_dsa_shake_256s, Params256s,
    n = 32, h_prime = 8, h = 64, d = 8, a = 14, k = 22, wots_len1 = 64, wots_len2 = 3
);

define_params!(
    /// SLH-DSA-SHAKE-256f parameters (NIST level 5, fast signing).
    #[cfg(feature = "slh-dsa-shake-256f")]
    slh_dsa_shake_256f, Params256f,
    n = 32, h_prime = 4, h = 68, d = 17, a = 9, k = 35, wots_len1 = 64, wots_len2 = 3
);

#[cfg(all(
    test,
    feature = "slh-dsa-shake-128s",
    feature = "slh-dsa-shake-128f",
    feature = "slh-dsa-shake-192s",
    feature = "slh-dsa-shake-192f",
    feature = "slh-dsa-shake-256s",
    feature = "slh-dsa-shake-256f"
))]
mod tests {
    #[test]
    fn signature_sizes_match_fips_205_table_1() {
        assert_eq!(super::slh_dsa_shake_128s::SIG_BYTES, 7856);
        assert_eq!(super::slh_dsa_shake_128f::SIG_BYTES, 17088);
        assert_eq!(super::slh_dsa_shake_192s::SIG_BYTES, 16224);
        assert_eq!(super::slh_dsa_shake_192f::SIG_BYTES, 35664);
        assert_eq!(super::slh_dsa_shake_256s::SIG_BYTES, 29792);
        assert_eq!(super::slh_dsa_shake_256f::SIG_BYTES, 49856);
    }

    #[test]
    fn public_key_sizes_match_fips_205() {
        assert_eq!(super::slh_dsa_shake_128s::PK_BYTES, 32);
        assert_eq!(super::slh_dsa_shake_192s::PK_BYTES, 48);
        assert_eq!(super::slh_dsa_shake_256s::PK_BYTES, 64);
    }

    #[test]
    fn secret_keys_carry_the_shared_seed() {
        // 3n seed shares + n sk_prf + n pk_seed + n pk_root.
        assert_eq!(super::slh_dsa_shake_128s::SK_BYTES, 96);
        assert_eq!(super::slh_dsa_shake_192f::SK_BYTES, 144);
        assert_eq!(super::slh_dsa_shake_256f::SK_BYTES, 192);
    }

    #[test]
    fn tree_geometry_is_consistent() {
        assert_eq!(
            super::slh_dsa_shake_128s::H_PRIME * super::slh_dsa_shake_128s::D,
            super::slh_dsa_shake_128s::H
        );
        assert_eq!(
            super::slh_dsa_shake_128f::H_PRIME * super::slh_dsa_shake_128f::D,
            super::slh_dsa_shake_128f::H
        );
        assert_eq!(
            super::slh_dsa_shake_256f::H_PRIME * super::slh_dsa_shake_256f::D,
            super::slh_dsa_shake_256f::H
        );
    }
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use triptych_core::Signer;
use triptych_slh_dsa::params::slh_dsa_shake_128f as p;
use triptych_slh_dsa::sign::slh_keygen_internal;
use triptych_slh_dsa::{Shake128Hash, SlhDsaShake128f};

/// A deterministic RNG seeded from fuzzer input.
struct FuzzRng {
    seed: [u8; 32],
    counter: u64,
}

impl FuzzRng {
    fn new(seed: &[u8]) -> Self {
        let mut s = [0u8; 32];
        let len = seed.len().min(32);
        s[..len].copy_from_slice(&seed[..len]);
        Self { seed: s, counter: 0 }
    }

    fn next_bytes(&mut self, dest: &mut [u8]) {
        use sha3::{Shake256, digest::{ExtendableOutput, Update, XofReader}};

        let mut hasher = Shake256::default();
        hasher.update(&self.seed);
        hasher.update(&self.counter.to_le_bytes());
        self.counter += 1;

        let mut reader = hasher.finalize_xof();
        reader.read(dest);
    }
}

impl rand_core::RngCore for FuzzRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.next_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.next_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.next_bytes(dest);
    }
}

impl rand_core::CryptoRng for FuzzRng {}

#[derive(Debug, Arbitrary)]
struct KeygenInput {
    seed: Vec<u8>,
}

fuzz_target!(|input: KeygenInput| {
    if input.seed.is_empty() {
        return;
    }

    let mut rng = FuzzRng::new(&input.seed);

    // Key generation should never panic
    let result = SlhDsaShake128f::keygen(&mut rng);
    assert!(result.is_ok(), "keygen should always succeed");

    let (sk, pk) = result.unwrap();

    // Keys should have correct sizes
    assert_eq!(sk.to_bytes().len(), SlhDsaShake128f::SIGNING_KEY_SIZE);
    assert_eq!(pk.to_bytes().len(), SlhDsaShake128f::VERIFICATION_KEY_SIZE);

    // The public key must not depend on the masking split: collapsing the
    // shared seed into a single share yields the same key pair.
    let sk_bytes = sk.to_bytes();
    let n = p::N;
    let mut folded = [[0u8; p::N]; 3];
    for j in 0..n {
        folded[0][j] = sk_bytes[j] ^ sk_bytes[n + j] ^ sk_bytes[2 * n + j];
    }
    let mut sk_prf = [0u8; p::N];
    sk_prf.copy_from_slice(&sk_bytes[3 * n..4 * n]);
    let mut pk_seed = [0u8; p::N];
    pk_seed.copy_from_slice(&sk_bytes[4 * n..5 * n]);

    let (_, pk_folded) = slh_keygen_internal::<Shake128Hash, { p::N }, { p::WOTS_LEN }, { p::H_PRIME }, { p::D }>(
        folded, sk_prf, pk_seed,
    );
    assert_eq!(pk.to_bytes(), pk_folded.to_bytes(), "pk must ignore the split");
});

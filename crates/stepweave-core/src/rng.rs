//! Seeded random number generation.
//!
//! All randomness in stepweave is deterministic given a seed. Given the same
//! seed, ghost hits, jitter, random note picks, and random automaton seed
//! rows are byte-identical across runs and platforms.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Create a seeded PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits for the PCG32 state by mirroring
/// it into the high word.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derive an independent stream seed from a base seed.
///
/// Uses a BLAKE3 hash over the little-endian encoding of `(base_seed,
/// stream_index)` so that adjacent stream indices produce unrelated
/// generators. Used to give each lane (kick, snare, hats, ...) its own
/// stream from one song seed.
pub fn derive_stream_seed(base_seed: u32, stream_index: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&stream_index.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().unwrap();
    u32::from_le_bytes(bytes)
}

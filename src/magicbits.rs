//! Magic-bits generator (C13): derives a table of pseudo-random bit
//! patterns from MD5 digests of small integers, for a Rabin-Karp-style
//! rolling hash. Does not participate in the C3–C9 matching pipeline,
//! which hashes whole windows with plain MD5; this is carried over as a
//! standalone auxiliary tool the way the historical toolkit shipped it.
use crate::model::Hash;

/// Derive `count` magic values by hashing the integers `0..count` with
/// MD5 and folding each digest's bytes into a single `u64` via XOR.
pub fn generate_magic_table(count: usize) -> Vec<u64> {
    (0..count).map(|i| magic_for(i as u64)).collect()
}

fn magic_for(seed: u64) -> u64 {
    let digest: Hash = md5::compute(seed.to_be_bytes()).0;
    fold_to_u64(&digest)
}

fn fold_to_u64(digest: &Hash) -> u64 {
    let mut out = 0u64;
    for chunk in digest.chunks(8) {
        let mut bytes = [0u8; 8];
        bytes[..chunk.len()].copy_from_slice(chunk);
        out ^= u64::from_be_bytes(bytes);
    }
    out
}

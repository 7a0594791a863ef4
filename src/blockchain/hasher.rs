use sha2::{Digest, Sha512};

/// Length of a hex-encoded SHA-512 digest.
pub const HASH_HEX_LEN: usize = 128;

/// SHA-512 over the canonical block preimage, hex encoded.
///
/// The preimage is the UTF-8 concatenation of `index`, `prev_hash`,
/// `timestamp`, `data` and `nonce`, integers in decimal and without
/// separators. Every node must hash in exactly this order for chains to be
/// comparable.
pub fn calculate_hash(
    index: u64,
    prev_hash: &str,
    timestamp: i64,
    data: &str,
    nonce: u64,
) -> String {
    let preimage = format!("{index}{prev_hash}{timestamp}{data}{nonce}");
    let mut hasher = Sha512::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// True when `hash` starts with `difficulty` zero characters.
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|c| c == b'0')
}

/// Lowercase hex string of digest length.
pub fn is_digest(s: &str) -> bool {
    s.len() == HASH_HEX_LEN && s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f'))
}

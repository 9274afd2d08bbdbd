//! Random share ids.

use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Maximum number of base-36 digits in one chunk.
pub const CHUNK_DIGITS: usize = 13;

/// Generates a share id from two random base-36 chunks.
pub fn generate_share_id() -> String {
    generate_share_id_with(&mut rand::thread_rng())
}

/// Same as [`generate_share_id`] with a caller-supplied generator.
pub fn generate_share_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = chunk(rng);
    id.push_str(&chunk(rng));
    id
}

/// Fractional digits of a random number in base 36: up to 13 characters,
/// trailing zeros dropped.
fn chunk<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut digits: Vec<u8> = (0..CHUNK_DIGITS)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect();
    while digits.len() > 1 && digits.last() == Some(&b'0') {
        digits.pop();
    }
    digits.into_iter().map(char::from).collect()
}

//! Task id generation.

use rand::Rng;

/// URL-safe alphabet: A-Z, a-z, 0-9, underscore, hyphen.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of generated task ids.
pub const ID_LENGTH: usize = 8;

/// Generate a new random task id.
///
/// Ids are short enough to type and paste between sessions. Collisions are
/// not checked; 64^8 values make them vanishingly unlikely within one store.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

use rand::Rng;

/// Alphabet used for filler letters
pub const FILLER_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draw one filler letter, uniformly over A-Z
pub fn random_letter(rng: &mut impl Rng) -> char {
    let idx = rng.random_range(0..FILLER_ALPHABET.len());
    FILLER_ALPHABET[idx] as char
}

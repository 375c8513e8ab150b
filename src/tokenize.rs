//! Fixed-delimiter ASCII tokenizer.
//!
//! The delimiter class is the complement of `[A-Za-z]`: digits, whitespace,
//! punctuation and every byte ≥ 0x80 split a run of letters. Case folding is
//! pure ASCII. This mirrors `tokenize()` in the original C implementation
//! (`strsep` over a fixed `WDELIMS` set, `tolower` on every byte first) bit
//! for bit, just without the intermediate `strdup`/`strsep` allocations.

/// Tokenize a raw byte string into lowercased ASCII words, in input order.
/// Duplicates are not suppressed; that's the dictionary builder's job.
pub fn tokenize(s: &[u8]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for &b in s {
        if b.is_ascii_alphabetic() {
            current.push(b.to_ascii_lowercase() as char);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

//! On-disk wire layout helpers shared by the writer and the reader.
//!
//! ```text
//! offset  size   field
//! 0       4      version (u32)
//! 4       8      docs_offset (i64)
//! 12      4      nwords (u32)
//! 16      W*N    word index, N = nwords, W = MAX_WORDLEN + 8
//!                  per entry: MAX_WORDLEN-byte NUL-padded word, then
//!                  8-byte little-endian list offset
//! ...            posting-list region, per word in index order:
//!                  4-byte length L, then L x 4-byte doc-ids
//! docs_offset    document region, per doc in id order:
//!                  2-byte namelen, namelen+1 bytes (name || NUL),
//!                  2-byte descrlen, descrlen+1 bytes (descr || NUL)
//! ```
//!
//! All integers are little-endian regardless of host, unlike the original
//! C tool, which used host-native order.

use crate::config::MAX_WORDLEN;
use crate::error::{FtsError, Result};

/// Encode a word into its fixed `MAX_WORDLEN`-byte, NUL-padded slot.
///
/// Callers are expected to have already rejected words of length ≥
/// `MAX_WORDLEN` (see `DictionaryBuilder::add`); this is enforced here too
/// so the writer can never silently produce a corrupt slot.
pub fn encode_word_slot(word: &str) -> Result<[u8; MAX_WORDLEN]> {
    let bytes = word.as_bytes();
    if bytes.len() >= MAX_WORDLEN {
        return Err(FtsError::WordTooLong(word.to_string(), MAX_WORDLEN - 1));
    }
    let mut slot = [0u8; MAX_WORDLEN];
    slot[..bytes.len()].copy_from_slice(bytes);
    Ok(slot)
}

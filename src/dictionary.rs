//! In-memory sorted dictionary of `word -> posting list`, built up before
//! being handed to the [`crate::writer::Writer`].
//!
//! Grounded in `dictionary_add`/`add_docid` from the original C implementation:
//! binary search for the insertion point, shift entries to make room for a
//! new word, dedup doc-ids on insert. The posting list itself is a
//! `RoaringBitmap` rather than the original's hand-rolled growable `int[]`,
//! since posting lists are exactly the sorted, duplicate-free `u32` sets
//! a roaring bitmap is built for.

use roaring::RoaringBitmap;

use crate::config::{BuildConfig, MAX_TOKEN_LEN};
use crate::error::{FtsError, Result};

/// One sorted entry: a word and the ascending, duplicate-free set of
/// document ids whose text contains it.
pub struct DictEntry {
    pub word: String,
    pub postings: RoaringBitmap,
}

/// Accumulates `(word, doc-id)` pairs into a sorted dictionary.
///
/// Callers are expected to emit every token of one document (in increasing
/// doc-id order) before moving to the next; `DictionaryBuilder` does not
/// itself enforce this, but it's the invariant the on-disk format and the
/// query engine rely on.
pub struct DictionaryBuilder {
    entries: Vec<DictEntry>,
    config: BuildConfig,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    /// Add a single `(word, doc-id)` pair.
    ///
    /// Rejects tokens of length ≥ `MAX_WORDLEN` outright, unlike the
    /// original, which silently truncated at write time.
    pub fn add(&mut self, word: &str, doc_id: u32) -> Result<()> {
        if word.is_empty() || word.len() > MAX_TOKEN_LEN {
            return Err(FtsError::WordTooLong(word.to_string(), MAX_TOKEN_LEN));
        }

        match self.entries.binary_search_by(|e| e.word.as_str().cmp(word)) {
            Ok(idx) => {
                self.entries[idx].postings.insert(doc_id);
            }
            Err(idx) => {
                self.reserve_one_more();
                let mut postings = RoaringBitmap::new();
                postings.insert(doc_id);
                self.entries.insert(
                    idx,
                    DictEntry {
                        word: word.to_string(),
                        postings,
                    },
                );
            }
        }

        Ok(())
    }

    /// Add every token in `words` under the same `doc-id`.
    pub fn add_words(&mut self, words: &[String], doc_id: u32) -> Result<()> {
        for word in words {
            self.add(word, doc_id)?;
        }
        Ok(())
    }

    fn reserve_one_more(&mut self) {
        if self.entries.len() == self.entries.capacity() {
            let target = self.config.grow(self.entries.capacity());
            self.entries.reserve(target - self.entries.len());
        }
    }
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_entries_sorted() {
        let mut dict = DictionaryBuilder::new();
        dict.add("banana", 0).unwrap();
        dict.add("apple", 0).unwrap();
        dict.add("cherry", 0).unwrap();

        let words: Vec<&str> = dict.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn repeated_word_same_doc_collapses_to_one_posting() {
        let mut dict = DictionaryBuilder::new();
        dict.add("hello", 0).unwrap();
        dict.add("hello", 0).unwrap();
        dict.add("hello", 0).unwrap();

        assert_eq!(dict.entries()[0].postings.len(), 1);
    }

    #[test]
    fn same_word_different_docs_appends() {
        let mut dict = DictionaryBuilder::new();
        dict.add("x", 0).unwrap();
        dict.add("x", 2).unwrap();

        let postings: Vec<u32> = dict.entries()[0].postings.iter().collect();
        assert_eq!(postings, vec![0, 2]);
    }

    #[test]
    fn overlong_word_is_rejected() {
        let mut dict = DictionaryBuilder::new();
        let long_word = "a".repeat(MAX_TOKEN_LEN + 1);
        assert!(matches!(
            dict.add(&long_word, 0),
            Err(FtsError::WordTooLong(_, _))
        ));
    }

    #[test]
    fn word_at_exact_limit_is_accepted() {
        let mut dict = DictionaryBuilder::new();
        let word = "a".repeat(MAX_TOKEN_LEN);
        assert!(dict.add(&word, 0).is_ok());
    }
}

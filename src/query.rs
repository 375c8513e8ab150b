//! Single-word lookup, multi-word intersection, and whole-index statistics.
//!
//! Grounded in `db_word_docs`/`db_idx_compar`/`db_stats` from the original
//! C implementation. The binary search and the corrupt-slot sentinel are
//! ported directly; because a document region offset inside a `Mmap` is not
//! guaranteed to be 4-byte aligned, posting lists are materialized into an
//! owned `Vec<u32>` by reading each little-endian word individually rather
//! than reinterpreting raw bytes as `&[u32]` — the same "read byte windows
//! into an owned buffer" idiom `VamanaSSTFile` uses throughout
//! `src/index/diskann/sst.rs` (`get_neighbors`, `decompress_vector`).

use std::cmp::Ordering;

use crate::document::Doc;
use crate::error::{FtsError, Result};
use crate::reader::Database;
use crate::tokenize::tokenize;

/// Whole-index statistics, as reported by `ftsearch -s`.
#[derive(Debug, Clone)]
pub struct Stats {
    pub nwords: usize,
    pub ndocs: usize,
    pub longest_word: String,
    pub most_popular: String,
    pub most_popular_ndocs: usize,
}

impl Database {
    fn index_slot(&self, i: usize) -> &[u8] {
        let start = self.index_start + i * (crate::config::INDEX_ENTRY_LEN as usize);
        &self.mmap[start..start + crate::config::MAX_WORDLEN]
    }

    /// `None` if slot `i`'s last byte is not NUL (a truncated-word
    /// corruption sentinel, per `db_idx_compar`).
    fn index_word(&self, i: usize) -> Option<&[u8]> {
        let slot = self.index_slot(i);
        if slot[slot.len() - 1] != 0 {
            return None;
        }
        let nul = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
        Some(&slot[..nul])
    }

    fn posting_list_at(&self, i: usize) -> Result<Vec<u32>> {
        let start = self.index_start + i * (crate::config::INDEX_ENTRY_LEN as usize);
        let pos_bytes = &self.mmap[start + crate::config::MAX_WORDLEN..start + crate::config::MAX_WORDLEN + 8];
        let pos = i64::from_le_bytes(pos_bytes.try_into().unwrap());

        if pos < self.list_start as i64 || pos >= self.list_end as i64 {
            return Err(FtsError::Corrupt("posting-list offset out of range".into()));
        }
        let pos = pos as usize;

        if pos + 4 > self.list_end {
            return Err(FtsError::Corrupt("truncated posting-list length".into()));
        }
        let len = u32::from_le_bytes(self.mmap[pos..pos + 4].try_into().unwrap()) as usize;

        let ids_start = pos + 4;
        let ids_end = ids_start + len * 4;
        if ids_end > self.list_end {
            return Err(FtsError::Corrupt("posting-list overruns its region".into()));
        }

        let mut ids = Vec::with_capacity(len);
        for i in 0..len {
            let p = ids_start + i * 4;
            ids.push(u32::from_le_bytes(self.mmap[p..p + 4].try_into().unwrap()));
        }
        Ok(ids)
    }

    /// Binary-search the word index for `word`'s posting list, returning
    /// an empty vector on a miss.
    pub fn word_docs(&self, word: &str) -> Vec<u32> {
        let target = word.as_bytes();
        let mut left = 0usize;
        let mut right = self.nwords as usize;

        while left < right {
            let mid = left + (right - left) / 2;
            match self.index_word(mid) {
                None => {
                    // Corrupt slot: treated as "greater than any word",
                    // forcing the search into the left half.
                    right = mid;
                }
                Some(candidate) => match target.cmp(candidate) {
                    Ordering::Equal => return self.posting_list_at(mid).unwrap_or_default(),
                    Ordering::Less => right = mid,
                    Ordering::Greater => left = mid + 1,
                },
            }
        }

        Vec::new()
    }

    /// Resolve a multi-word query as the intersection of each token's
    /// posting list, materializing document records for each hit.
    pub fn fts(&self, query: &str) -> Result<Vec<u32>> {
        let mut hits = Vec::new();
        self.fts_each(query, |id, _doc| {
            hits.push(id);
            true
        })?;
        Ok(hits)
    }

    /// Streaming form of [`Database::fts`]. `cb` returns `false` to stop
    /// the walk early without that being treated as an error.
    pub fn fts_each(&self, query: &str, mut cb: impl FnMut(u32, &Doc<'_>) -> bool) -> Result<()> {
        let tokens = tokenize(query.as_bytes());
        if tokens.is_empty() {
            return Ok(());
        }

        let mut lists: Vec<Vec<u32>> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let list = self.word_docs(token);
            if list.is_empty() {
                return Ok(());
            }
            lists.push(list);
        }

        for id in k_way_intersect(&lists) {
            let doc = self.doc_by_id(id)?;
            if !cb(id, &doc) {
                break;
            }
        }

        Ok(())
    }

    /// Scan the word index once to report counts, the longest word, and
    /// the word with the largest posting list.
    ///
    /// Fails fast on the first corrupt (non-NUL-terminated) slot: unlike
    /// `word_docs`, a full scan has no reason to skip past one.
    pub fn stats(&self) -> Result<Stats> {
        let ndocs = {
            let mut count = 0usize;
            self.list_all(|_, _| {
                count += 1;
                true
            })?;
            count
        };

        let mut longest_word = String::new();
        let mut most_popular = String::new();
        let mut most_popular_ndocs = 0usize;

        for i in 0..self.nwords as usize {
            let word = self
                .index_word(i)
                .ok_or_else(|| FtsError::Corrupt(format!("word index slot {i} is corrupt")))?;
            let word = std::str::from_utf8(word)
                .map_err(|_| FtsError::Corrupt(format!("word index slot {i} is not ASCII")))?;

            if word.len() > longest_word.len() {
                longest_word = word.to_string();
            }

            let len = self.posting_list_at(i)?.len();
            if len > most_popular_ndocs {
                most_popular_ndocs = len;
                most_popular = word.to_string();
            }
        }

        Ok(Stats {
            nwords: self.nwords as usize,
            ndocs,
            longest_word,
            most_popular,
            most_popular_ndocs,
        })
    }
}

/// k-way merge of sorted, duplicate-free `u32` lists: one cursor per list,
/// advance every cursor behind the current maximum, emit when all agree.
fn k_way_intersect(lists: &[Vec<u32>]) -> Vec<u32> {
    let mut cursors = vec![0usize; lists.len()];
    let mut out = Vec::new();

    loop {
        if cursors.iter().zip(lists).any(|(&c, l)| c >= l.len()) {
            break;
        }

        let max = cursors
            .iter()
            .zip(lists)
            .map(|(&c, l)| l[c])
            .max()
            .unwrap();

        let mut all_match = true;
        for (cursor, list) in cursors.iter_mut().zip(lists) {
            if list[*cursor] < max {
                *cursor += 1;
                all_match = false;
            }
        }

        if all_match {
            out.push(max);
            for cursor in &mut cursors {
                *cursor += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryBuilder;
    use crate::document::DocumentBuilder;
    use crate::writer::Writer;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn build(dict: &DictionaryBuilder, docs: &DocumentBuilder) -> Database {
        let mut buf = Cursor::new(Vec::new());
        Writer::create(&mut buf, dict, docs).unwrap();
        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), buf.into_inner()).unwrap();
        // keep tmp alive via leak -- Database owns its own mmap, so this is
        // only to keep the backing file from being deleted before open()
        let db = Database::open(tmp.path()).unwrap();
        std::mem::forget(tmp);
        db
    }

    fn ingest(dict: &mut DictionaryBuilder, docs: &mut DocumentBuilder, name: &str, text: &str) {
        let id = docs.push(name, text).unwrap();
        let toks = tokenize(text.as_bytes());
        dict.add_words(&toks, id).unwrap();
    }

    #[test]
    fn scenario_two_documents_the_fox_and_the_dog() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest(&mut dict, &mut docs, "alpha", "the quick brown fox");
        ingest(&mut dict, &mut docs, "beta", "the lazy dog");

        let db = build(&dict, &docs);

        assert_eq!(db.fts("the").unwrap(), vec![0, 1]);
        assert_eq!(db.fts("fox").unwrap(), vec![0]);
        assert!(db.fts("cat").unwrap().is_empty());
    }

    #[test]
    fn scenario_case_folding_collapses_to_one_posting() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest(&mut dict, &mut docs, "doc1", "Hello, HELLO! hello?");

        let db = build(&dict, &docs);
        assert_eq!(db.word_docs("hello"), vec![0]);
        assert_eq!(db.fts("hello").unwrap(), vec![0]);
    }

    #[test]
    fn scenario_two_word_query_intersects() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest(&mut dict, &mut docs, "d0", "x");
        ingest(&mut dict, &mut docs, "d1", "y");
        ingest(&mut dict, &mut docs, "d2", "x y");

        let db = build(&dict, &docs);
        assert_eq!(db.fts("x y").unwrap(), vec![2]);

        let stats = db.stats().unwrap();
        assert_eq!(stats.ndocs, 3);
    }

    #[test]
    fn empty_query_yields_no_results() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest(&mut dict, &mut docs, "d0", "hello");
        let db = build(&dict, &docs);

        assert!(db.fts("...").unwrap().is_empty());
    }

    #[test]
    fn corrupt_index_slot_fails_stats_but_not_word_docs() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest(&mut dict, &mut docs, "d0", "alpha beta");

        let mut buf = Cursor::new(Vec::new());
        Writer::create(&mut buf, &dict, &docs).unwrap();
        let mut bytes = buf.into_inner();

        // corrupt the first word slot's trailing NUL (slot starts right
        // after the 16-byte header; MAX_WORDLEN = 32).
        let slot_last_byte = 16 + 31;
        bytes[slot_last_byte] = b'z';

        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), &bytes).unwrap();
        let db = Database::open(tmp.path()).unwrap();

        assert!(db.stats().is_err());
        // single lookup for a different word still works: the corrupt
        // slot is routed around, never matched.
        assert!(db.word_docs("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").is_empty());
    }
}

//! Opens a database image read-only, memory-maps it, and validates the
//! header.
//!
//! Grounded in `db_open`/`initdb` from the original C implementation:
//! the mapping is established once, the three region boundaries are
//! computed and checked, and every subsequent access re-checks against
//! them rather than trusting the header further.

use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

use crate::config::{HEADER_LEN, INDEX_ENTRY_LEN};
use crate::error::{FtsError, Result};

/// A read-only, memory-mapped handle onto a database image.
///
/// All views handed out to callers (posting-list slices, document byte
/// slices) borrow from `mmap` and are bounded by the lifetime of this
/// struct. Dropping `Database` drops the `Mmap`, which unmaps the file.
pub struct Database {
    pub(crate) mmap: Mmap,
    pub(crate) nwords: u32,
    pub(crate) index_start: usize,
    pub(crate) index_end: usize,
    pub(crate) list_start: usize,
    pub(crate) list_end: usize,
    pub(crate) docs_start: usize,
    pub(crate) docs_end: usize,
}

impl Database {
    /// Memory-map and validate the database image at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Self::from_mmap(mmap)
    }

    fn from_mmap(mmap: Mmap) -> Result<Self> {
        let len = mmap.len() as u64;
        if len < HEADER_LEN {
            return Err(FtsError::Corrupt("file shorter than header".into()));
        }

        let docs_offset = i64::from_le_bytes(mmap[4..12].try_into().unwrap());
        if docs_offset < 0 || docs_offset as u64 > len {
            return Err(FtsError::Corrupt("docs_offset out of range".into()));
        }

        let nwords = u32::from_le_bytes(mmap[12..16].try_into().unwrap());

        let index_start = HEADER_LEN;
        let index_end = index_start + nwords as u64 * INDEX_ENTRY_LEN;
        let list_start = index_end;
        let list_end = docs_offset as u64;
        let docs_start = list_end;
        let docs_end = len;

        if index_end > docs_end {
            return Err(FtsError::Corrupt("word index overruns file".into()));
        }
        if list_end > docs_end {
            return Err(FtsError::Corrupt("posting-list region overruns file".into()));
        }
        if list_end < index_end {
            return Err(FtsError::Corrupt("docs_offset precedes end of word index".into()));
        }

        Ok(Database {
            mmap,
            nwords,
            index_start: index_start as usize,
            index_end: index_end as usize,
            list_start: list_start as usize,
            list_end: list_end as usize,
            docs_start: docs_start as usize,
            docs_end: docs_end as usize,
        })
    }

    pub fn nwords(&self) -> u32 {
        self.nwords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryBuilder;
    use crate::document::DocumentBuilder;
    use crate::writer::Writer;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn build_db(dict: &DictionaryBuilder, docs: &DocumentBuilder) -> NamedTempFile {
        let mut buf = Cursor::new(Vec::new());
        Writer::create(&mut buf, dict, docs).unwrap();

        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), buf.into_inner()).unwrap();
        tmp
    }

    #[test]
    fn opens_a_well_formed_database() {
        let mut dict = DictionaryBuilder::new();
        dict.add("hello", 0).unwrap();
        let mut docs = DocumentBuilder::new();
        docs.push("doc1", "hello").unwrap();

        let tmp = build_db(&dict, &docs);
        let db = Database::open(tmp.path()).unwrap();
        assert_eq!(db.nwords(), 1);
    }

    #[test]
    fn opens_a_zero_document_database() {
        let dict = DictionaryBuilder::new();
        let docs = DocumentBuilder::new();

        let tmp = build_db(&dict, &docs);
        let db = Database::open(tmp.path()).unwrap();
        assert_eq!(db.nwords(), 0);
        assert_eq!(db.docs_start, db.docs_end);
    }

    #[test]
    fn rejects_a_truncated_file() {
        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), [0u8; 4]).unwrap();
        assert!(Database::open(tmp.path()).is_err());
    }
}

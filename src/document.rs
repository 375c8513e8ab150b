//! Document records: the owned form the builder accumulates, the borrowed
//! form the reader hands back, and the bounds-checked parser shared by both
//! `list_all` and `doc_by_id`.
//!
//! Grounded in `struct db_entry` and `db_extract_doc` from the original C
//! implementation — the wire shape (`namelen[2] name[namelen] NUL
//! descrlen[2] descr[descrlen] NUL`) is unchanged.

use crate::error::{FtsError, Result};
use crate::reader::Database;

/// An owned `(name, description)` pair, as accumulated by the builder.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub name: Vec<u8>,
    pub descr: Vec<u8>,
}

/// Accumulates document records in insertion order, assigning each a
/// 0-based id as it is pushed.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    docs: Vec<DocumentRecord>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.docs
    }

    /// Append a document, returning its assigned doc-id.
    ///
    /// `name` must be non-empty; neither `name` nor `descr` may contain a
    /// NUL byte (the on-disk format NUL-terminates both).
    pub fn push(&mut self, name: impl Into<Vec<u8>>, descr: impl Into<Vec<u8>>) -> Result<u32> {
        let name = name.into();
        let descr = descr.into();

        if name.is_empty() {
            return Err(FtsError::Input("document name must not be empty".into()));
        }
        if name.contains(&0) || descr.contains(&0) {
            return Err(FtsError::Input(
                "document name/description must not contain a NUL byte".into(),
            ));
        }
        if name.len() > u16::MAX as usize || descr.len() > u16::MAX as usize {
            return Err(FtsError::Input(
                "document name/description exceeds 65535 bytes".into(),
            ));
        }

        let id = self.docs.len() as u32;
        self.docs.push(DocumentRecord { name, descr });
        Ok(id)
    }
}

/// A borrowed `(name, description)` view into a memory-mapped database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Doc<'a> {
    pub name: &'a [u8],
    pub descr: &'a [u8],
}

/// Parse one document record out of `buf` at `pos`, returning the view and
/// the cursor position just past it. `docs_end` bounds every read.
///
/// Mirrors `db_extract_doc`: every length read and every subsequent byte
/// access is checked against `docs_end` before it happens.
pub(crate) fn parse_record(buf: &[u8], pos: usize, docs_end: usize) -> Result<(Doc<'_>, usize)> {
    let mut p = pos;

    if p + 2 > docs_end {
        return Err(FtsError::Corrupt("truncated document record (namelen)".into()));
    }
    let namelen = u16::from_le_bytes([buf[p], buf[p + 1]]) as usize;
    p += 2;

    if p + namelen + 1 > docs_end || buf[p + namelen] != 0 {
        return Err(FtsError::Corrupt("truncated or unterminated document name".into()));
    }
    let name = &buf[p..p + namelen];
    p += namelen + 1;

    if p + 2 > docs_end {
        return Err(FtsError::Corrupt("truncated document record (descrlen)".into()));
    }
    let descrlen = u16::from_le_bytes([buf[p], buf[p + 1]]) as usize;
    p += 2;

    if p + descrlen + 1 > docs_end || buf[p + descrlen] != 0 {
        return Err(FtsError::Corrupt(
            "truncated or unterminated document description".into(),
        ));
    }
    let descr = &buf[p..p + descrlen];
    p += descrlen + 1;

    Ok((Doc { name, descr }, p))
}

impl Database {
    /// Walk every document record in id order, calling `cb(id, doc)` for
    /// each. `cb` returning `false` stops the walk early — that is not an
    /// error, distinct from a genuine `Err` on corrupt input.
    pub fn list_all(&self, mut cb: impl FnMut(u32, &Doc<'_>) -> bool) -> Result<()> {
        let mut pos = self.docs_start;
        let mut id = 0u32;
        while pos < self.docs_end {
            let (doc, next) = parse_record(&self.mmap, pos, self.docs_end)?;
            if !cb(id, &doc) {
                break;
            }
            pos = next;
            id += 1;
        }
        Ok(())
    }

    /// Fetch the document with the given id by walking the document region
    /// from its start. There is no direct id-to-offset index (mirrors
    /// `db_extract_doc`'s own linear scan); callers that need many lookups
    /// should prefer `list_all`.
    pub fn doc_by_id(&self, id: u32) -> Result<Doc<'_>> {
        let mut pos = self.docs_start;
        let mut current = 0u32;
        while pos < self.docs_end {
            let (doc, next) = parse_record(&self.mmap, pos, self.docs_end)?;
            if current == id {
                return Ok(doc);
            }
            pos = next;
            current += 1;
        }
        Err(FtsError::NotFound)
    }
}

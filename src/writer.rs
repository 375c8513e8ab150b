//! Serializes a [`DictionaryBuilder`] and a [`DocumentBuilder`] into the
//! on-disk database image.
//!
//! Grounded in `db_create`/`write_dictionary` from the original C
//! implementation, using the same two-pass "reserve header, write body,
//! seek back and fill in the header" pattern.

use std::io::{Seek, SeekFrom, Write};

use crate::config::{DB_VERSION, HEADER_LEN, INDEX_ENTRY_LEN};
use crate::dictionary::DictionaryBuilder;
use crate::document::DocumentBuilder;
use crate::error::{FtsError, Result};
use crate::format::encode_word_slot;

pub struct Writer;

impl Writer {
    /// Write a self-contained database image to `output`.
    ///
    /// `output` must support both `Write` and `Seek` since the header's
    /// `docs_offset` field is only known after the body has been written
    /// and is filled in by seeking back to it.
    pub fn create<W: Write + Seek>(
        output: &mut W,
        dictionary: &DictionaryBuilder,
        documents: &DocumentBuilder,
    ) -> Result<()> {
        if dictionary.len() as u64 > u32::MAX as u64 {
            return Err(FtsError::Input("dictionary too large to index".into()));
        }

        // 1. version
        output.write_all(&DB_VERSION.to_le_bytes())?;

        // 2. reserve docs_offset, filled in at the end
        let docs_offset_pos = output.stream_position()?;
        output.write_all(&0i64.to_le_bytes())?;

        // 3. nwords
        let nwords = dictionary.len() as u32;
        output.write_all(&nwords.to_le_bytes())?;

        // 4. word index
        let index_end = HEADER_LEN + nwords as u64 * INDEX_ENTRY_LEN;
        let mut cursor = index_end;
        for entry in dictionary.entries() {
            let slot = encode_word_slot(&entry.word)?;
            output.write_all(&slot)?;
            output.write_all(&(cursor as i64).to_le_bytes())?;
            cursor += 4 * (1 + entry.postings.len());
        }

        // 5. posting-list region
        for entry in dictionary.entries() {
            let len = entry.postings.len() as u32;
            output.write_all(&len.to_le_bytes())?;
            for doc_id in entry.postings.iter() {
                output.write_all(&doc_id.to_le_bytes())?;
            }
        }

        // 6. document region
        let docs_offset = output.stream_position()?;
        for record in documents.records() {
            let namelen = record.name.len() as u16;
            output.write_all(&namelen.to_le_bytes())?;
            output.write_all(&record.name)?;
            output.write_all(&[0u8])?;

            let descrlen = record.descr.len() as u16;
            output.write_all(&descrlen.to_le_bytes())?;
            output.write_all(&record.descr)?;
            output.write_all(&[0u8])?;
        }

        // 7. seek back and fill in docs_offset
        let end = output.stream_position()?;
        output.seek(SeekFrom::Start(docs_offset_pos))?;
        output.write_all(&(docs_offset as i64).to_le_bytes())?;
        output.seek(SeekFrom::Start(end))?;

        Ok(())
    }
}

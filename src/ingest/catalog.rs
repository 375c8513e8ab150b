//! Mode `p`: index a package catalog.
//!
//! Grounded in `idx_ports` in `mkftsidx/ports.c`, which queries a sqlports
//! SQLite database (`pkgstem`, `comment`, `descr_contents`) and tokenizes
//! `"<pkgstem> <comment> <descr>"` per row. No sqlite-binding crate is
//! fetchable in this environment, so the source is a `serde_json` array of
//! `{name, comment, descr}` objects dumped from such a database instead —
//! same three fields, same per-row document shape.

use std::path::Path;

use serde::Deserialize;

use crate::dictionary::DictionaryBuilder;
use crate::document::DocumentBuilder;
use crate::error::{FtsError, Result};
use crate::tokenize::tokenize;

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    descr: String,
}

/// Index every entry of the catalog file at `path`.
///
/// Each entry becomes one document, named after `name` and described by
/// `comment`; the dictionary is built over `"<name> <comment> <descr>"`,
/// mirroring the original's `asprintf("%s %s %s", pkgstem, comment, descr)`.
pub fn ingest_catalog(
    dict: &mut DictionaryBuilder,
    docs: &mut DocumentBuilder,
    path: &Path,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
        .map_err(|e| FtsError::Input(format!("malformed catalog {}: {e}", path.display())))?;

    if entries.is_empty() {
        eprintln!("warning: catalog {} is empty", path.display());
    }

    for entry in entries {
        let id = docs.push(entry.name.clone(), entry.comment.clone())?;
        let doc_text = format!("{} {} {}", entry.name, entry.comment, entry.descr);
        let tokens = tokenize(doc_text.as_bytes());
        dict.add_words(&tokens, id)?;
    }

    Ok(())
}

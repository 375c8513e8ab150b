//! Mode `w`: index a Wikipedia abstract dump.
//!
//! Grounded in `idx_wiki`/`el_start`/`el_end`/`on_text` in
//! `mkftsidx/wiki.c`, which streams the dump through `expat` and, on each
//! closing `</doc>`, emits one document named after `<url>` and described
//! by `<title>` (with a leading `"Wikipedia: "` stripped), tokenizing
//! `"<title> <abstract>"`. No XML-parsing crate is fetchable in this
//! environment, so `<doc>` records are located with a hand-rolled scanner
//! instead of a SAX parser — sufficient for the dump's flat, unnested
//! `<title>`/`<url>`/`<abstract>` fields.

use std::path::Path;

use crate::dictionary::DictionaryBuilder;
use crate::document::DocumentBuilder;
use crate::error::{FtsError, Result};
use crate::tokenize::tokenize;

const WIKIPEDIA_PREFIX: &str = "Wikipedia: ";

fn extract_tag(block: &str, tag: &str) -> String {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let Some(start) = block.find(&open) else {
        return String::new();
    };
    let start = start + open.len();
    let Some(end) = block[start..].find(&close) else {
        return String::new();
    };
    unescape_entities(&block[start..start + end])
}

fn unescape_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

/// Index every `<doc>...</doc>` record in the dump at `path`.
///
/// `on_progress` is called with the running document count after every
/// 1000th record, mirroring the original's `printf("=> %zu\n", d->len)`.
pub fn ingest_wiki_dump(
    dict: &mut DictionaryBuilder,
    docs: &mut DocumentBuilder,
    path: &Path,
    mut on_progress: impl FnMut(usize),
) -> Result<()> {
    let xml = std::fs::read_to_string(path)
        .map_err(|e| FtsError::Input(format!("can't open {}: {e}", path.display())))?;

    for block in xml.split("<doc>").skip(1) {
        let Some(end) = block.find("</doc>") else {
            continue;
        };
        let record = &block[..end];

        let url = extract_tag(record, "url");
        let mut title = extract_tag(record, "title");
        let abstract_ = extract_tag(record, "abstract");

        if url.is_empty() {
            continue;
        }
        if let Some(stripped) = title.strip_prefix(WIKIPEDIA_PREFIX) {
            title = stripped.to_string();
        }

        let id = docs.push(url, title.clone())?;

        if docs.len() % 1000 == 0 {
            on_progress(docs.len());
        }

        let doc_text = format!("{title} {abstract_}");
        let tokens = tokenize(doc_text.as_bytes());
        dict.add_words(&tokens, id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"<feed>
<doc><title>Wikipedia: Rust (programming language)</title><url>https://en.wikipedia.org/wiki/Rust</url><abstract>Rust is a systems programming language.</abstract></doc>
<doc><title>Wikipedia: Ocaml</title><url>https://en.wikipedia.org/wiki/OCaml</url><abstract>OCaml is a functional language.</abstract></doc>
</feed>"#;

    #[test]
    fn indexes_each_doc_record_and_strips_the_wikipedia_prefix() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), DUMP).unwrap();

        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        let mut progress_calls = 0;
        ingest_wiki_dump(&mut dict, &mut docs, tmp.path(), |_| progress_calls += 1).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs.records()[0].descr, b"Rust (programming language)");
        assert_eq!(docs.records()[0].name, b"https://en.wikipedia.org/wiki/Rust");
        assert_eq!(progress_calls, 0);
        assert!(dict.entries().iter().any(|e| e.word == "systems"));
    }

    #[test]
    fn records_without_a_url_are_skipped() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "<doc><title>No URL</title><abstract>nothing</abstract></doc>",
        )
        .unwrap();

        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        ingest_wiki_dump(&mut dict, &mut docs, tmp.path(), |_| {}).unwrap();
        assert_eq!(docs.len(), 0);
    }
}

//! Mode `f`: index arbitrary files, either given on the command line or
//! read one path per line from stdin.
//!
//! Grounded in `idx_files`/`pfile` in `mkftsidx/files.c`: a file that fails
//! to open is reported and skipped rather than aborting the whole run, and
//! the caller learns about it only through the aggregate return value
//! (there, a process exit code; here, `Ok(false)`).

use std::io::BufRead;
use std::path::Path;

use crate::dictionary::DictionaryBuilder;
use crate::document::DocumentBuilder;
use crate::error::Result;
use crate::tokenize::tokenize;

fn index_one(dict: &mut DictionaryBuilder, docs: &mut DocumentBuilder, path: &Path) -> Result<bool> {
    let contents = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("can't open {}: {err}", path.display());
            return Ok(false);
        }
    };

    let id = docs.push(path.display().to_string(), "")?;
    let tokens = tokenize(&contents);
    dict.add_words(&tokens, id)?;
    Ok(true)
}

/// Index each path in `paths`. Returns `Ok(true)` only if every path
/// opened successfully; a file that fails to open is skipped, not fatal.
pub fn ingest_paths<P: AsRef<Path>>(
    dict: &mut DictionaryBuilder,
    docs: &mut DocumentBuilder,
    paths: impl IntoIterator<Item = P>,
) -> Result<bool> {
    let mut all_ok = true;
    for path in paths {
        if !index_one(dict, docs, path.as_ref())? {
            all_ok = false;
        }
    }
    Ok(all_ok)
}

/// Index one path per line read from `reader` (trailing newline stripped).
pub fn ingest_stdin(
    dict: &mut DictionaryBuilder,
    docs: &mut DocumentBuilder,
    reader: impl BufRead,
) -> Result<bool> {
    let mut all_ok = true;
    for line in reader.lines() {
        let line = line?;
        if !index_one(dict, docs, Path::new(&line))? {
            all_ok = false;
        }
    }
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn indexes_existing_files_and_uses_their_path_as_the_name() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "hello world").unwrap();

        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        let ok = ingest_paths(&mut dict, &mut docs, [f.path()]).unwrap();

        assert!(ok);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs.records()[0].name, f.path().display().to_string().into_bytes());
        assert!(!dict.entries().is_empty());
    }

    #[test]
    fn missing_file_is_skipped_but_reported_via_return_value() {
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        let ok = ingest_paths(&mut dict, &mut docs, ["/nonexistent/path/for/sure"]).unwrap();

        assert!(!ok);
        assert_eq!(docs.len(), 0);
    }

    #[test]
    fn ingest_stdin_reads_one_path_per_line() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "content").unwrap();

        let input = format!("{}\n", f.path().display());
        let mut dict = DictionaryBuilder::new();
        let mut docs = DocumentBuilder::new();
        let ok = ingest_stdin(&mut dict, &mut docs, input.as_bytes()).unwrap();

        assert!(ok);
        assert_eq!(docs.len(), 1);
    }
}

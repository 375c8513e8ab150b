//! Build a database image from one of three ingestion sources.
//!
//! Grounded in `mkftsidx/mkftsidx.c`'s argument handling (`-o`, `-m`); the
//! mode dispatch mirrors `idx_files`/`idx_ports`/`idx_wiki`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use ftsearch::ingest::{catalog, files, wiki};
use ftsearch::{DictionaryBuilder, DocumentBuilder, Writer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Index arbitrary files (from `paths`, or one path per line on stdin).
    F,
    /// Index a relational package catalog (a serde_json catalog file).
    P,
    /// Index a Wikipedia abstract XML dump.
    W,
}

#[derive(Debug, Parser)]
#[command(name = "mkftsidx", about = "Build a full-text search index")]
struct Args {
    /// Output database path.
    #[arg(short = 'o', long = "output", default_value = "db.fts")]
    output: PathBuf,

    /// Ingestion mode: f (files), p (catalog), w (wiki dump).
    #[arg(short = 'm', long = "mode", value_enum, default_value = "f")]
    mode: Mode,

    /// Paths to index (mode f), or the catalog/dump path (modes p, w).
    paths: Vec<PathBuf>,
}

const DEFAULT_CATALOG: &str = "/usr/local/share/ftsearch/catalog.json";

fn main() -> Result<()> {
    let args = Args::parse();
    ftsearch::privilege::drop_new_privileges();

    let mut dict = DictionaryBuilder::new();
    let mut docs = DocumentBuilder::new();
    let mut had_ingest_failure = false;

    match args.mode {
        Mode::F => {
            if args.paths.is_empty() {
                let stdin = std::io::stdin();
                let ok = files::ingest_stdin(&mut dict, &mut docs, stdin.lock())
                    .context("reading paths from stdin")?;
                had_ingest_failure = !ok;
            } else {
                let ok = files::ingest_paths(&mut dict, &mut docs, &args.paths)
                    .context("indexing files")?;
                had_ingest_failure = !ok;
            }
        }
        Mode::P => {
            let path = match args.paths.first() {
                Some(p) => p.clone(),
                None => std::env::var("FTSEARCH_CATALOG")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG)),
            };
            catalog::ingest_catalog(&mut dict, &mut docs, &path).context("indexing catalog")?;
        }
        Mode::W => {
            let Some(path) = args.paths.first() else {
                bail!("mode w requires the path to an XML abstract dump");
            };
            wiki::ingest_wiki_dump(&mut dict, &mut docs, path, |n| println!("=> {n}"))
                .context("indexing wiki dump")?;
        }
    }

    let result = write_database(&args.output, &dict, &docs);
    if result.is_err() {
        let _ = std::fs::remove_file(&args.output);
    }
    result?;

    if had_ingest_failure {
        bail!("one or more inputs failed to index; database was still written");
    }
    Ok(())
}

fn write_database(path: &PathBuf, dict: &DictionaryBuilder, docs: &DocumentBuilder) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    Writer::create(&mut file, dict, docs).with_context(|| format!("writing {}", path.display()))
}

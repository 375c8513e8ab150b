//! Query a database image: full-text search, list, stats, or lookup by id.
//!
//! Grounded in `ftsearch/ftsearch.c`'s argument handling and `print_entry`'s
//! `"%-18s %s\n"` output format.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ftsearch::{Database, Doc};

#[derive(Debug, Parser)]
#[command(name = "ftsearch", about = "Query a full-text search index")]
struct Args {
    /// Database path.
    #[arg(short = 'd', long = "database", default_value = "db.fts")]
    database: PathBuf,

    /// List every document in the database.
    #[arg(short = 'l', long, conflicts_with_all = ["stats", "print_id"])]
    list: bool,

    /// Print index statistics.
    #[arg(short = 's', long, conflicts_with = "print_id")]
    stats: bool,

    /// Print the document with the given id.
    #[arg(short = 'p', long = "print")]
    print_id: Option<u32>,

    /// Query string (ignored if -l, -s, or -p is given).
    query: Option<String>,
}

fn print_entry(doc: &Doc<'_>) {
    let name = String::from_utf8_lossy(doc.name);
    let descr = String::from_utf8_lossy(doc.descr);
    println!("{name:<18} {descr}");
}

fn main() -> Result<()> {
    let args = Args::parse();
    ftsearch::privilege::drop_new_privileges();

    let db = Database::open(&args.database)
        .with_context(|| format!("opening {}", args.database.display()))?;

    if args.list {
        db.list_all(|_, doc| {
            print_entry(doc);
            true
        })?;
        return Ok(());
    }

    if args.stats {
        let stats = db.stats()?;
        println!("words:            {}", stats.nwords);
        println!("documents:        {}", stats.ndocs);
        println!("longest word:     {}", stats.longest_word);
        println!(
            "most popular:     {} ({} documents)",
            stats.most_popular, stats.most_popular_ndocs
        );
        return Ok(());
    }

    if let Some(id) = args.print_id {
        let doc = db.doc_by_id(id)?;
        print_entry(&doc);
        return Ok(());
    }

    let query = args.query.unwrap_or_default();
    db.fts_each(&query, |_, doc| {
        print_entry(doc);
        true
    })?;

    Ok(())
}

//! A compact full-text search engine built on a single-file, read-only,
//! memory-mapped inverted index.
//!
//! Build a database with [`DictionaryBuilder`] + [`DocumentBuilder`] +
//! [`Writer`], then open it read-only with [`Database::open`] and query it
//! with [`Database::word_docs`]/[`Database::fts`]/[`Database::fts_each`],
//! enumerate it with [`Database::list_all`]/[`Database::doc_by_id`], or
//! inspect it with [`Database::stats`].

pub mod config;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod format;
pub mod ingest;
pub mod privilege;
pub mod query;
pub mod reader;
pub mod tokenize;
pub mod writer;

pub use config::BuildConfig;
pub use dictionary::{DictEntry, DictionaryBuilder};
pub use document::{Doc, DocumentBuilder, DocumentRecord};
pub use error::{FtsError, Result};
pub use query::Stats;
pub use reader::Database;
pub use tokenize::tokenize;
pub use writer::Writer;

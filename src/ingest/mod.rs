//! The three ingestion modes `mkftsidx` supports, one submodule each.
//!
//! Grounded in `mkftsidx/files.c`, `mkftsidx/ports.c`, and `mkftsidx/wiki.c`
//! from the original C implementation. Two of the three substitute for a
//! dependency that isn't available in this environment (no SQLite binding
//! or XML-parsing crate) — see each submodule for what it substitutes and
//! why.

pub mod catalog;
pub mod files;
pub mod wiki;

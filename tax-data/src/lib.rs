//! Loading of bracket tables from CSV files.

pub mod loader;

pub use loader::{BracketRecord, BracketTableLoader, BracketTableLoaderError, BracketTables};

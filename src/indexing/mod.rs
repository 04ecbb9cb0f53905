//! File discovery, line resolution, and the indexing loop.

pub mod indexer;
pub mod source_line;
pub mod walker;

pub use indexer::{IndexError, ParseDiagnostic, TagIndexer};
pub use walker::FileWalker;

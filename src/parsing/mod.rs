//! Source parsing and declaration classification.
//!
//! The grammar is supplied by tree-sitter; the rest of the crate only sees
//! [`Declaration`] values, so the indexing logic can be exercised from
//! in-memory source strings without touching the filesystem.

pub mod go;

pub use go::{GoParseError, GoParser};

use crate::tags::{TagKind, TagScope};

/// One classified top-level symbol: the classifier's output contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Symbol identifier, never empty
    pub name: String,
    /// 1-based source line the search pattern is anchored to
    pub line: u32,
    pub kind: TagKind,
    pub scope: TagScope,
}

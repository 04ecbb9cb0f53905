//! Tag record types and serialization.
//!
//! A [`TagRecord`] is one line of the output index. The serialized form
//! follows the Exuberant Ctags extended format:
//!
//! ```text
//! <name>\t<file>\t/^<pattern>$/;"\t<kind>\t<scope>
//! ```
//!
//! The scope field is always present, empty when the symbol has no
//! enclosing type, so every record has the same column count.

use std::fmt;

/// Single-character tag kind codes, matching the classic ctags mapping
/// for Go symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Interface definition ('class' in ctags terms)
    Class,
    /// Constant ('#define' in ctags terms)
    Constant,
    /// Function or method
    Function,
    /// Structure member
    Member,
    /// Structure
    Struct,
    /// Named type alias or other named type
    Type,
    /// Variable
    Variable,
}

impl TagKind {
    /// The single-character code emitted in the tag line.
    pub fn code(self) -> char {
        match self {
            TagKind::Class => 'c',
            TagKind::Constant => 'd',
            TagKind::Function => 'f',
            TagKind::Member => 'm',
            TagKind::Struct => 's',
            TagKind::Type => 't',
            TagKind::Variable => 'v',
        }
    }
}

/// Scope qualifier linking a member or method back to its enclosing type.
///
/// Carried as a variant internally and only formatted to the textual
/// `class:<name>` / `struct:<name>` form when the record is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagScope {
    /// No enclosing type
    #[default]
    None,
    /// Method or interface method, scoped to the named type
    Class(String),
    /// Struct field, scoped to the named struct
    Struct(String),
}

impl fmt::Display for TagScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagScope::None => Ok(()),
            TagScope::Class(name) => write!(f, "class:{name}"),
            TagScope::Struct(name) => write!(f, "struct:{name}"),
        }
    }
}

/// One entry of the tag index, immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    name: String,
    file: String,
    pattern: Vec<u8>,
    kind: TagKind,
    scope: TagScope,
}

impl TagRecord {
    pub fn new(
        name: String,
        file: String,
        pattern: Vec<u8>,
        kind: TagKind,
        scope: TagScope,
    ) -> Self {
        Self {
            name,
            file,
            pattern,
            kind,
            scope,
        }
    }

    /// Render the record as one ctags line.
    ///
    /// The search pattern is the raw line content framed by `^` and `$`
    /// anchors. No metacharacter escaping is applied to the captured text,
    /// so a line containing a literal `/` produces a pattern some strict
    /// consumers reject (see `pattern_with_slash_is_not_escaped`).
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t/^{}$/;\"\t{}\t{}",
            self.name,
            self.file,
            String::from_utf8_lossy(&self.pattern),
            self.kind.code(),
            self.scope
        )
    }
}

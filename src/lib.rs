pub mod config;
pub mod indexing;
pub mod logging;
pub mod parsing;
pub mod tags;

pub use config::Settings;
pub use indexing::{FileWalker, IndexError, ParseDiagnostic, TagIndexer};
pub use parsing::{Declaration, GoParseError, GoParser};
pub use tags::{TagIndex, TagKind, TagRecord, TagScope};

//! Tag synthesis and output.

pub mod index;
pub mod record;

pub use index::TagIndex;
pub use record::{TagKind, TagRecord, TagScope};

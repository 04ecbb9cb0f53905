//! Tag collection and emission.
//!
//! Records accumulate in insertion order during traversal; ordering only
//! matters at emission, where the serialized lines are sorted byte-wise so
//! consumers honoring the `!_TAG_FILE_SORTED\t1` pragma can binary-search
//! the file. Identical lines are preserved, not deduplicated.

use std::io::{self, Write};

use crate::tags::TagRecord;

const TAG_FILE_FORMAT: &str = "!_TAG_FILE_FORMAT\t2";
const TAG_FILE_SORTED: &str = "!_TAG_FILE_SORTED\t1";

/// Append-only collection of tag records, consumed once at the end of a run.
#[derive(Debug, Default)]
pub struct TagIndex {
    records: Vec<TagRecord>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TagRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize all records and sort the lines lexicographically
    /// (plain byte-wise string ordering).
    pub fn sorted_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.records.iter().map(TagRecord::to_line).collect();
        lines.sort_unstable();
        lines
    }

    /// Write the header pragmas followed by the sorted tag body.
    ///
    /// An empty collection still produces a well-formed header-only file.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{TAG_FILE_FORMAT}")?;
        writeln!(writer, "{TAG_FILE_SORTED}")?;
        writeln!(writer, "!_TAG_PROGRAM_AUTHOR\t{}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(writer, "!_TAG_PROGRAM_NAME\t{}", env!("CARGO_PKG_NAME"))?;
        writeln!(writer, "!_TAG_PROGRAM_URL\t{}", env!("CARGO_PKG_REPOSITORY"))?;
        for line in self.sorted_lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

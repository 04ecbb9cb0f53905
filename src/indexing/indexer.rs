//! The traversal loop: resolve inputs, then read, parse, classify, and
//! synthesize tags one file at a time.
//!
//! The indexer is an explicit accumulator: it owns the parser and the tag
//! collection for the write phase, and `finish` hands the populated index
//! to the emission phase. Nothing is shared, nothing is global.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::indexing::{FileWalker, source_line};
use crate::indexing::walker::has_extension;
use crate::parsing::{GoParseError, GoParser};
use crate::tags::{TagIndex, TagRecord};

/// Error type for indexer construction and orchestration.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to create Go parser: {0}")]
    ParserInit(#[from] GoParseError),
}

/// The first parse failure of a run, retained as a non-fatal diagnostic.
#[derive(Debug)]
pub struct ParseDiagnostic {
    pub path: PathBuf,
    pub error: GoParseError,
}

pub struct TagIndexer {
    settings: Arc<Settings>,
    parser: GoParser,
    index: TagIndex,
    first_failure: Option<ParseDiagnostic>,
    failed_files: usize,
}

impl TagIndexer {
    pub fn new(settings: Arc<Settings>) -> Result<Self, IndexError> {
        Ok(Self {
            settings,
            parser: GoParser::new()?,
            index: TagIndex::new(),
            first_failure: None,
            failed_files: 0,
        })
    }

    /// Resolve the given paths to a file list and index each file in order.
    ///
    /// Regular files with a recognized extension are taken as given.
    /// Directories are walked only in recursive mode. Unreadable paths and
    /// unrecognized files are excluded without comment.
    pub fn index_paths(&mut self, paths: &[PathBuf]) {
        for file in self.resolve_inputs(paths) {
            self.index_file(&file);
        }
    }

    fn resolve_inputs(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            let meta = match fs::metadata(path) {
                Ok(meta) => meta,
                Err(e) => {
                    debug!("skipping {}: {e}", path.display());
                    continue;
                }
            };
            if meta.is_file() {
                if has_extension(path, &self.settings.indexing.extensions) {
                    files.push(path.clone());
                } else {
                    debug!("skipping {}: not a recognized source file", path.display());
                }
            } else if meta.is_dir() && self.settings.indexing.recurse {
                let walker = FileWalker::new(Arc::clone(&self.settings));
                files.extend(walker.walk(path));
            } else {
                debug!("skipping {}: directory without --recurse", path.display());
            }
        }
        files
    }

    /// Index one file: every classified declaration becomes a tag record
    /// whose search pattern is the exact content of its source line.
    pub fn index_file(&mut self, path: &Path) {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                debug!("skipping {}: {e}", path.display());
                return;
            }
        };

        let declarations = match self.parser.parse(&source) {
            Ok(declarations) => declarations,
            Err(error) => {
                warn!("parse failure in {}: {error}", path.display());
                self.failed_files += 1;
                if self.first_failure.is_none() {
                    self.first_failure = Some(ParseDiagnostic {
                        path: path.to_path_buf(),
                        error,
                    });
                }
                return;
            }
        };

        let file = path.to_string_lossy().into_owned();
        for decl in declarations {
            // The file is re-read on purpose: if it vanished or shrank
            // between parse and resolve, the pattern degrades to empty and
            // the tag is still emitted.
            let pattern = source_line::content_of_line(path, decl.line);
            self.index.push(TagRecord::new(
                decl.name,
                file.clone(),
                pattern,
                decl.kind,
                decl.scope,
            ));
        }
    }

    pub fn failed_files(&self) -> usize {
        self.failed_files
    }

    /// Consume the indexer, ending the write phase.
    pub fn finish(self) -> (TagIndex, Option<ParseDiagnostic>) {
        (self.index, self.first_failure)
    }
}

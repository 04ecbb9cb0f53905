//! File system walker for discovering source files under recursive mode.
//!
//! Built on the `ignore` crate: respects `.gitignore` rules, skips hidden
//! files, and applies the ignore patterns and extension list from the
//! configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;

use crate::config::Settings;

pub struct FileWalker {
    settings: Arc<Settings>,
}

impl FileWalker {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Walk a directory and yield the source files to index.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false); // Honor .gitignore in non-git directories too

        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &self.settings.indexing.ignore_patterns {
            // Overrides are inclusion globs; a leading ! excludes instead.
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("invalid ignore pattern {pattern:?}: {e}");
            }
        }
        if let Ok(overrides) = override_builder.build() {
            builder.overrides(overrides);
        }

        let extensions = self.settings.indexing.extensions.clone();
        builder
            .build()
            .filter_map(Result::ok) // Skip entries we cannot access
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(move |entry| {
                let path = entry.path();
                if is_hidden(path) {
                    return None;
                }
                if has_extension(path, &extensions) {
                    Some(path.to_path_buf())
                } else {
                    None
                }
            })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

pub(crate) fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_settings() -> Arc<Settings> {
        Arc::new(Settings::default())
    }

    #[test]
    fn test_walk_finds_only_go_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("main.go"), "package main\n").unwrap();
        fs::create_dir(root.join("pkg")).unwrap();
        fs::write(root.join("pkg").join("util.go"), "package pkg\n").unwrap();
        fs::write(root.join("notes.txt"), "not source\n").unwrap();
        fs::write(root.join("script.py"), "pass\n").unwrap();

        let walker = FileWalker::new(test_settings());
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("main.go")));
        assert!(files.iter().any(|p| p.ends_with("pkg/util.go")));
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".hidden.go"), "package p\n").unwrap();
        fs::write(root.join("visible.go"), "package p\n").unwrap();

        let walker = FileWalker::new(test_settings());
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.go"));
    }

    #[test]
    fn test_gitignore_is_respected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "generated.go\n").unwrap();
        fs::write(root.join("generated.go"), "package p\n").unwrap();
        fs::write(root.join("handwritten.go"), "package p\n").unwrap();

        let walker = FileWalker::new(test_settings());
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("handwritten.go"));
    }

    #[test]
    fn test_configured_ignore_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("vendor")).unwrap();
        fs::write(root.join("vendor").join("dep.go"), "package dep\n").unwrap();
        fs::write(root.join("app.go"), "package app\n").unwrap();

        let mut settings = Settings::default();
        settings.indexing.ignore_patterns = vec!["vendor/**".to_string()];
        let walker = FileWalker::new(Arc::new(settings));
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.go"));
    }
}

//! Source provider abstraction for filesystem-independent compilation.
//!
//! The [`SourceProvider`] trait abstracts reading `.hconf` text and listing
//! fixture directories, so the CLI and the conformance runner can work from
//! disk or from memory through the same path.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Trait that abstracts file I/O in front of the pipeline.
pub trait SourceProvider {
    /// Read the source text for a given path. Input must be UTF-8.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;

    /// Files directly inside `dir` with the given extension, sorted.
    fn list_sources(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error>;
}

/// Default filesystem-backed source provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn list_sources(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, extension) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// In-memory source provider, for suites assembled in code.
///
/// Paths are normalized (`.` and `..` resolved lexically) on insert and on
/// lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(p, s)| (normalize_path(&p), s))
            .collect();
        Self { files }
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), text.into());
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }

    fn list_sources(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, std::io::Error> {
        let dir = normalize_path(dir);
        let mut paths: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()) && has_extension(p, extension))
            .cloned()
            .collect();
        paths.sort();
        Ok(paths)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            other => components.push(other),
        }
    }
    components.iter().collect()
}

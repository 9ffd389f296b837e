//! File system abstraction for reading site content.
//!
//! Everything the site serves (posts, page templates, partials, static
//! files) is read through the [`FileSystem`] trait, so the renderer can run
//! against the real disk or an in-memory tree in tests.

use std::collections::BTreeMap;
use std::io;

use camino::Utf8Path;
use camino::Utf8PathBuf;

/// Trait for file system operations
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file as UTF-8
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String>;

    /// Read the entire contents of a file as bytes
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;

    /// Check if a path is a file
    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Check if a path is a directory
    fn is_directory(&self, path: &Utf8Path) -> bool;

    /// List directory contents
    fn read_directory(&self, path: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>>;
}

/// Standard file system implementation that uses `std::fs`
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn is_directory(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn read_directory(&self, path: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        path.read_dir_utf8()?
            .map(|entry| entry.map(|e| e.path().to_owned()))
            .collect()
    }
}

/// In-memory file system
///
/// Directories exist implicitly as the ancestors of added files.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFileSystem {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl InMemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<Utf8PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    fn not_found(path: &Utf8Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("{path}: file not found"))
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.read_to_string(path).map(String::into_bytes)
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_directory(&self, path: &Utf8Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }

    fn read_directory(&self, path: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        if !self.is_directory(path) {
            return Err(Self::not_found(path));
        }

        let mut entries: Vec<Utf8PathBuf> = self
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(path).ok())
            .filter_map(|relative| relative.components().next())
            .map(|child| path.join(child))
            .collect();
        entries.dedup();
        Ok(entries)
    }
}

use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::NavError;
use std::io;
use std::path::{Path, PathBuf};

use super::fs::FileSystem;

/// The result of enumerating one directory.
#[derive(Debug)]
pub struct Listing {
    pub path: PathBuf,
    pub entries: Vec<DirectoryEntry>,
    /// Set when enumeration failed; `entries` is then empty.
    pub error: Option<NavError>,
}

impl Listing {
    pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &Path, show_hidden: bool) -> Self {
        match read_listing(fs, path, show_hidden) {
            Ok(entries) => Self {
                path: path.to_path_buf(),
                entries,
                error: None,
            },
            Err(source) => {
                tracing::warn!(path = %path.display(), error = %source, "listing failed");
                Self {
                    path: path.to_path_buf(),
                    entries: Vec::new(),
                    error: Some(NavError::ListingFailed {
                        path: path.to_path_buf(),
                        source,
                    }),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

pub fn read_listing<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    show_hidden: bool,
) -> Result<Vec<DirectoryEntry>, io::Error> {
    let mut entries: Vec<DirectoryEntry> = fs
        .list_names(path)?
        .into_iter()
        .map(|name| {
            let kind = if fs.is_directory(&fs.join(path, Path::new(&name))) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            DirectoryEntry { name, kind }
        })
        .filter(|entry| show_hidden || !entry.is_hidden())
        .collect();
    entries.sort_by(|a, b| a.cmp_by_name(b));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileSystem;

    fn sample() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/w/.git");
        fs.add_file("/w/a.txt");
        fs.add_dir("/w/b");
        fs
    }

    #[test]
    fn test_hidden_entries_filtered() {
        let fs = sample();
        let entries = read_listing(&fs, Path::new("/w"), false).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b"]);
    }

    #[test]
    fn test_hidden_entries_shown_sorted() {
        let fs = sample();
        let entries = read_listing(&fs, Path::new("/w"), true).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".git", "a.txt", "b"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/w/beta");
        fs.add_file("/w/Alpha");
        fs.add_file("/w/alpha");
        let listing = Listing::load(&fs, Path::new("/w"), false);
        assert_eq!(listing.names(), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_failure_degrades_to_empty_listing() {
        let fs = sample();
        fs.deny("/w");
        let listing = Listing::load(&fs, Path::new("/w"), false);
        assert!(listing.entries.is_empty());
        assert!(matches!(
            listing.error,
            Some(NavError::ListingFailed { ref path, .. }) if path == Path::new("/w")
        ));
    }
}

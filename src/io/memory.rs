// In-memory filesystem tree, for tests and for embedding without disk access
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::fs::FileSystem;

#[derive(Default)]
struct Tree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
    denied: BTreeSet<PathBuf>,
    home: Option<PathBuf>,
    working_dir: PathBuf,
}

/// A filesystem held entirely in memory. Paths are absolute and stored as given.
///
/// Mutators take `&self` so a tree shared with a navigator can still be changed
/// underneath it.
pub struct MemoryFileSystem {
    tree: Mutex<Tree>,
}

impl MemoryFileSystem {
    /// An empty tree containing only `/`, which is also the working directory.
    pub fn new() -> Self {
        let mut tree = Tree {
            working_dir: PathBuf::from("/"),
            ..Tree::default()
        };
        tree.dirs.insert(PathBuf::from("/"));
        Self {
            tree: Mutex::new(tree),
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a directory and all of its missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut tree = self.tree();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            tree.dirs.insert(ancestor.to_path_buf());
        }
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.tree().files.insert(path.to_path_buf());
        self
    }

    /// Removes `path` and everything beneath it.
    pub fn remove(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        let mut tree = self.tree();
        tree.dirs.retain(|p| !p.starts_with(path));
        tree.files.retain(|p| !p.starts_with(path));
        self
    }

    /// Makes listing `path` fail with `PermissionDenied`.
    pub fn deny(&self, path: impl AsRef<Path>) -> &Self {
        self.tree().denied.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn set_home(&self, path: impl AsRef<Path>) -> &Self {
        self.add_dir(path.as_ref());
        self.tree().home = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn set_working_directory(&self, path: impl AsRef<Path>) -> &Self {
        self.add_dir(path.as_ref());
        self.tree().working_dir = path.as_ref().to_path_buf();
        self
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_directory(&self, path: &Path) -> bool {
        self.tree().dirs.contains(path)
    }

    fn list_names(&self, path: &Path) -> io::Result<Vec<String>> {
        let tree = self.tree();
        if tree.denied.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        if !tree.dirs.contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        Ok(tree
            .dirs
            .iter()
            .chain(tree.files.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect())
    }

    fn home_directory(&self) -> Option<PathBuf> {
        self.tree().home.clone()
    }

    fn working_directory(&self) -> io::Result<PathBuf> {
        Ok(self.tree().working_dir.clone())
    }
}

// Filesystem collaborator consumed by the navigator
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The operations navigation needs from a filesystem.
pub trait FileSystem {
    fn is_directory(&self, path: &Path) -> bool;

    /// Base names of the children of `path`, in no particular order.
    fn list_names(&self, path: &Path) -> io::Result<Vec<String>>;

    fn join(&self, base: &Path, relative: &Path) -> PathBuf {
        base.join(relative)
    }

    /// Parent of `path`. A root is its own parent.
    fn parent_of(&self, path: &Path) -> PathBuf {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    }

    fn home_directory(&self) -> Option<PathBuf>;

    /// Base for relative paths that are not resolved against the current location.
    fn working_directory(&self) -> io::Result<PathBuf>;
}

/// The host operating system's filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Names that are not valid UTF-8 are skipped: a lossy name would not
    /// join back to the entry on disk.
    fn list_names(&self, path: &Path) -> io::Result<Vec<String>> {
        let read_dir = fs::read_dir(path)?;
        Ok(read_dir
            .flatten()
            .filter_map(|entry| match entry.file_name().into_string() {
                Ok(name) => Some(name),
                Err(raw) => {
                    tracing::warn!(dir = %path.display(), name = ?raw, "skipping non-UTF-8 name");
                    None
                }
            })
            .collect())
    }

    fn home_directory(&self) -> Option<PathBuf> {
        directories::UserDirs::new().map(|ud| ud.home_dir().to_path_buf())
    }

    fn working_directory(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }
}

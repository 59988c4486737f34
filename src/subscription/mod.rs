mod watcher;

pub use watcher::DirectoryWatcher;

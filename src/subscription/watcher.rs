use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Watches one directory at a time, non-recursively.
pub struct DirectoryWatcher {
    watcher: RecommendedWatcher,
    watched: Option<PathBuf>,
    events: Receiver<()>,
}

impl DirectoryWatcher {
    pub fn new() -> notify::Result<Self> {
        let (tx, rx) = channel();
        let watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if res.is_ok() {
                let _ = tx.send(());
            }
        })?;
        Ok(Self {
            watcher,
            watched: None,
            events: rx,
        })
    }

    pub fn watched(&self) -> Option<&Path> {
        self.watched.as_deref()
    }

    /// Moves the watch to `path`. Re-watching the same path is a no-op.
    pub fn watch(&mut self, path: &Path) -> notify::Result<()> {
        if self.watched.as_deref() == Some(path) {
            return Ok(());
        }
        if let Some(old) = self.watched.take() {
            let _ = self.watcher.unwatch(&old);
        }
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        self.watched = Some(path.to_path_buf());
        // Events from the previous directory are no longer interesting.
        while self.events.try_recv().is_ok() {}
        Ok(())
    }

    /// The watched directory, if anything changed in it since the last call.
    pub fn changed(&self) -> Option<PathBuf> {
        let mut changed = false;
        while self.events.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            self.watched.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[test]
    fn test_watch_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut watcher = DirectoryWatcher::new().unwrap();
        assert!(watcher.watch(&dir.path().join("gone")).is_err());
        assert!(watcher.watched().is_none());
    }

    #[test]
    fn test_change_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut watcher = DirectoryWatcher::new().unwrap();
        watcher.watch(dir.path()).unwrap();
        watcher.watch(dir.path()).unwrap();
        assert_eq!(watcher.watched(), Some(dir.path()));

        fs::write(dir.path().join("new.txt"), "hello").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = None;
        while seen.is_none() && Instant::now() < deadline {
            seen = watcher.changed();
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(seen, Some(dir.path().to_path_buf()));
    }
}

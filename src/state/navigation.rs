// Navigation state - history and current location
use std::path::{Path, PathBuf};

/// Linear browser-style history with a cursor.
///
/// `history[history_index] == current_path` holds between calls, and the
/// history is never empty.
#[derive(Clone, Debug)]
pub struct NavigationState {
    current_path: PathBuf,
    history: Vec<PathBuf>,
    history_index: usize,
}

impl NavigationState {
    pub fn new(start_path: PathBuf) -> Self {
        Self {
            current_path: start_path.clone(),
            history: vec![start_path],
            history_index: 0,
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Records a visit. Revisiting the current path leaves history alone,
    /// otherwise the forward branch is dropped and `path` becomes the last entry.
    /// Returns whether history changed.
    pub fn push_history(&mut self, path: PathBuf) -> bool {
        if path == self.current_path {
            return false;
        }
        // Remove any forward history when navigating to a new path
        self.history.truncate(self.history_index + 1);
        self.history.push(path.clone());
        self.history_index = self.history.len() - 1;
        self.current_path = path;
        true
    }

    /// Moves to `path` without recording a visit: the entry at the cursor is
    /// replaced. If that makes it equal to a neighbour the two are merged, so
    /// history never holds the same path twice in a row.
    pub fn replace_current(&mut self, path: PathBuf) {
        let idx = self.history_index;
        if idx > 0 && self.history[idx - 1] == path {
            self.history.remove(idx);
            self.history_index -= 1;
        } else if self.history.get(idx + 1) == Some(&path) {
            self.history.remove(idx + 1);
            self.history[idx] = path.clone();
        } else {
            self.history[idx] = path.clone();
        }
        self.current_path = path;
    }

    pub fn peek_back(&self) -> Option<&Path> {
        self.history_index
            .checked_sub(1)
            .map(|idx| self.history[idx].as_path())
    }

    pub fn peek_forward(&self) -> Option<&Path> {
        self.history.get(self.history_index + 1).map(PathBuf::as_path)
    }

    pub fn go_back(&mut self) -> Option<PathBuf> {
        if self.history_index > 0 {
            self.history_index -= 1;
            self.current_path = self.history[self.history_index].clone();
            Some(self.current_path.clone())
        } else {
            None
        }
    }

    pub fn go_forward(&mut self) -> Option<PathBuf> {
        if self.history_index < self.history.len() - 1 {
            self.history_index += 1;
            self.current_path = self.history[self.history_index].clone();
            Some(self.current_path.clone())
        } else {
            None
        }
    }
}

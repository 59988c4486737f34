use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Direction, NavError};
use crate::io::path::{expand_tilde, normalize};
use crate::io::{FileSystem, Listing};
use crate::state::NavigationState;

/// How a `goto` target is interpreted and recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GotoOptions {
    /// Append the target to history, dropping any forward entries.
    /// When false the entry at the history cursor is replaced instead.
    pub record_history: bool,
    /// Join the target onto the current path before resolving.
    pub relative_to_current: bool,
}

impl Default for GotoOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            relative_to_current: false,
        }
    }
}

impl GotoOptions {
    pub fn relative() -> Self {
        Self {
            relative_to_current: true,
            ..Self::default()
        }
    }

    pub fn unrecorded() -> Self {
        Self {
            record_history: false,
            ..Self::default()
        }
    }
}

/// A location change, before any listing is produced.
#[derive(Clone, Debug)]
pub(crate) enum Move {
    Goto(PathBuf, GotoOptions),
    Back,
    Forward,
    Up,
    Home,
}

/// Tracks the current directory and the back/forward history.
///
/// Every failed move leaves the path and history exactly as they were.
pub struct Navigator<F> {
    fs: Arc<F>,
    state: NavigationState,
    show_hidden: bool,
}

impl<F: FileSystem> Navigator<F> {
    /// Starts at `start_path`, which must be an existing directory.
    pub fn new(fs: Arc<F>, start_path: impl AsRef<Path>) -> Result<Self, NavError> {
        let start = resolve(fs.as_ref(), None, start_path.as_ref(), false)?;
        ensure_directory(fs.as_ref(), &start)?;
        tracing::debug!(path = %start.display(), "navigator started");
        Ok(Self {
            fs,
            state: NavigationState::new(start),
            show_hidden: false,
        })
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn fs(&self) -> &Arc<F> {
        &self.fs
    }

    pub fn current_path(&self) -> &Path {
        self.state.current_path()
    }

    pub fn history(&self) -> &[PathBuf] {
        self.state.history()
    }

    pub fn history_cursor(&self) -> usize {
        self.state.history_index()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.peek_back().is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.peek_forward().is_some()
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn goto(&mut self, path: impl AsRef<Path>) -> Result<Listing, NavError> {
        self.goto_with(path, GotoOptions::default())
    }

    pub fn goto_with(
        &mut self,
        path: impl AsRef<Path>,
        options: GotoOptions,
    ) -> Result<Listing, NavError> {
        self.apply(Move::Goto(path.as_ref().to_path_buf(), options))?;
        Ok(self.list_current())
    }

    pub fn back(&mut self) -> Result<Listing, NavError> {
        self.apply(Move::Back)?;
        Ok(self.list_current())
    }

    pub fn forward(&mut self) -> Result<Listing, NavError> {
        self.apply(Move::Forward)?;
        Ok(self.list_current())
    }

    /// Goes to the parent directory. At a root this re-lists the root and
    /// history does not grow.
    pub fn up(&mut self) -> Result<Listing, NavError> {
        self.apply(Move::Up)?;
        Ok(self.list_current())
    }

    pub fn goto_home(&mut self) -> Result<Listing, NavError> {
        self.apply(Move::Home)?;
        Ok(self.list_current())
    }

    pub fn refresh(&self) -> Listing {
        self.list_current()
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) -> Listing {
        self.set_hidden_flag(show_hidden);
        self.list_current()
    }

    pub fn toggle_show_hidden(&mut self) -> Listing {
        self.set_show_hidden(!self.show_hidden)
    }

    /// Entries of the current directory, sorted, hidden files filtered per the flag.
    pub fn list_current(&self) -> Listing {
        Listing::load(self.fs.as_ref(), self.state.current_path(), self.show_hidden)
    }

    pub(crate) fn set_hidden_flag(&mut self, show_hidden: bool) {
        self.show_hidden = show_hidden;
    }

    /// Updates path and history for `mv` without listing.
    pub(crate) fn apply(&mut self, mv: Move) -> Result<(), NavError> {
        match mv {
            Move::Goto(target, options) => self.goto_path(&target, options),
            Move::Back => {
                let target = self
                    .state
                    .peek_back()
                    .ok_or(NavError::HistoryExhausted(Direction::Back))?;
                ensure_directory(self.fs.as_ref(), target)?;
                self.state.go_back();
                tracing::debug!(path = %self.current_path().display(), "went back");
                Ok(())
            }
            Move::Forward => {
                let target = self
                    .state
                    .peek_forward()
                    .ok_or(NavError::HistoryExhausted(Direction::Forward))?;
                ensure_directory(self.fs.as_ref(), target)?;
                self.state.go_forward();
                tracing::debug!(path = %self.current_path().display(), "went forward");
                Ok(())
            }
            Move::Up => {
                let parent = self.fs.parent_of(self.state.current_path());
                self.goto_path(&parent, GotoOptions::default())
            }
            Move::Home => {
                let home = self.fs.home_directory().ok_or(NavError::NoHomeDirectory)?;
                self.goto_path(&home, GotoOptions::default())
            }
        }
    }

    fn goto_path(&mut self, target: &Path, options: GotoOptions) -> Result<(), NavError> {
        let resolved = resolve(
            self.fs.as_ref(),
            Some(self.state.current_path()),
            target,
            options.relative_to_current,
        )?;
        ensure_directory(self.fs.as_ref(), &resolved)?;

        if options.record_history {
            if !self.state.push_history(resolved) {
                tracing::debug!("revisited current directory, history unchanged");
            }
        } else {
            self.state.replace_current(resolved);
        }
        tracing::debug!(path = %self.current_path().display(), "navigated");
        Ok(())
    }
}

fn ensure_directory<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<(), NavError> {
    if fs.is_directory(path) {
        Ok(())
    } else {
        Err(NavError::InvalidTarget {
            path: path.to_path_buf(),
        })
    }
}

/// Turns `target` into an absolute, normalised path.
///
/// Relative targets are joined onto `current` when `relative_to_current`,
/// otherwise onto the working directory. A leading `~` is only expanded in
/// the latter case, since an entry may literally be called `~`.
fn resolve<F: FileSystem + ?Sized>(
    fs: &F,
    current: Option<&Path>,
    target: &Path,
    relative_to_current: bool,
) -> Result<PathBuf, NavError> {
    let joined = match current {
        Some(current) if relative_to_current => fs.join(current, target),
        _ => {
            let expanded = if target.starts_with("~") {
                expand_tilde(target, fs.home_directory().as_deref())
                    .ok_or(NavError::NoHomeDirectory)?
            } else {
                target.to_path_buf()
            };
            if expanded.is_absolute() {
                expanded
            } else {
                let cwd = fs
                    .working_directory()
                    .map_err(|_| NavError::InvalidTarget {
                        path: target.to_path_buf(),
                    })?;
                fs.join(&cwd, &expanded)
            }
        }
    };
    Ok(normalize(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileSystem;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    fn tree() -> Arc<MemoryFileSystem> {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/a")
            .add_dir("/b")
            .add_dir("/c")
            .add_dir("/d")
            .add_dir("/e")
            .add_dir("/home/ana/Downloads")
            .add_file("/home/ana/notes.txt")
            .add_dir("/home/ana/.config")
            .set_home("/home/ana")
            .set_working_directory("/home");
        Arc::new(fs)
    }

    fn consistent<F: FileSystem>(nav: &Navigator<F>) -> bool {
        nav.history()[nav.history_cursor()] == nav.current_path()
    }

    #[test]
    fn test_history_consistent_after_each_goto() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        assert!(consistent(&nav));
        for target in ["/b", "/c", "/b", "/home/ana", "/"] {
            nav.goto(target).unwrap();
            assert!(consistent(&nav), "after goto {}", target);
            assert_eq!(nav.current_path(), Path::new(target));
        }
        assert_eq!(nav.history().len(), 6);
    }

    #[test]
    fn test_back_then_forward_restores_path() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("/b").unwrap();
        nav.goto("/c").unwrap();
        nav.back().unwrap();
        assert_eq!(nav.current_path(), Path::new("/b"));

        nav.back().unwrap();
        nav.forward().unwrap();
        assert_eq!(nav.current_path(), Path::new("/b"));
        assert_eq!(nav.history_cursor(), 1);
        assert!(consistent(&nav));
    }

    #[test]
    fn test_goto_after_back_truncates_forward_entries() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("/b").unwrap();
        nav.goto("/c").unwrap();
        nav.goto("/d").unwrap();
        assert_eq!(nav.history_cursor(), 3);

        nav.back().unwrap();
        nav.back().unwrap();
        assert_eq!(nav.history_cursor(), 1);
        assert_eq!(nav.current_path(), Path::new("/b"));

        nav.goto("/e").unwrap();
        assert_eq!(nav.history(), &[p("/a"), p("/b"), p("/e")]);
        assert_eq!(nav.history_cursor(), 2);
        assert!(!nav.can_go_forward());
    }

    #[test]
    fn test_back_at_start_is_reported_no_op() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        let err = nav.back().unwrap_err();
        assert!(matches!(err, NavError::HistoryExhausted(Direction::Back)));
        assert_eq!(nav.current_path(), Path::new("/a"));
        assert_eq!(nav.history(), &[p("/a")]);
    }

    #[test]
    fn test_forward_at_end_is_reported_no_op() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("/b").unwrap();
        let err = nav.forward().unwrap_err();
        assert!(matches!(err, NavError::HistoryExhausted(Direction::Forward)));
        assert_eq!(nav.history_cursor(), 1);
    }

    #[test]
    fn test_goto_file_changes_nothing() {
        let mut nav = Navigator::new(tree(), "/home/ana").unwrap();
        nav.goto("/a").unwrap();
        let history = nav.history().to_vec();

        let err = nav.goto("/home/ana/notes.txt").unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidTarget { ref path } if path == Path::new("/home/ana/notes.txt")
        ));
        assert_eq!(nav.current_path(), Path::new("/a"));
        assert_eq!(nav.history(), history.as_slice());
    }

    #[test]
    fn test_goto_missing_directory_changes_nothing() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        assert!(nav.goto("/nowhere").is_err());
        assert_eq!(nav.history(), &[p("/a")]);
    }

    #[test]
    fn test_relative_goto_joins_current_path() {
        let mut nav = Navigator::new(tree(), "/home/ana").unwrap();
        let listing = nav.goto_with("Downloads", GotoOptions::relative()).unwrap();
        assert_eq!(nav.current_path(), Path::new("/home/ana/Downloads"));
        assert_eq!(listing.path, p("/home/ana/Downloads"));

        nav.goto_with("../..", GotoOptions::relative()).unwrap();
        assert_eq!(nav.current_path(), Path::new("/home"));
    }

    #[test]
    fn test_relative_path_without_flag_uses_working_directory() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("ana/Downloads").unwrap();
        assert_eq!(nav.current_path(), Path::new("/home/ana/Downloads"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("~/Downloads").unwrap();
        assert_eq!(nav.current_path(), Path::new("/home/ana/Downloads"));
    }

    #[test]
    fn test_up_and_repeated_up_at_root() {
        let mut nav = Navigator::new(tree(), "/home/ana").unwrap();
        nav.up().unwrap();
        assert_eq!(nav.current_path(), Path::new("/home"));
        nav.up().unwrap();
        assert_eq!(nav.current_path(), Path::new("/"));

        let listing = nav.up().unwrap();
        nav.up().unwrap();
        assert_eq!(nav.current_path(), Path::new("/"));
        assert_eq!(nav.history(), &[p("/home/ana"), p("/home"), p("/")]);
        assert!(listing.names().contains(&"home"));
    }

    #[test]
    fn test_goto_home() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto_home().unwrap();
        assert_eq!(nav.current_path(), Path::new("/home/ana"));
        assert_eq!(nav.history().len(), 2);
    }

    #[test]
    fn test_goto_home_without_home() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_dir("/a");
        let mut nav = Navigator::new(fs, "/a").unwrap();
        assert!(matches!(nav.goto_home(), Err(NavError::NoHomeDirectory)));
        assert_eq!(nav.history(), &[p("/a")]);
    }

    #[test]
    fn test_unrecorded_goto_replaces_cursor_entry() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("/b").unwrap();
        nav.goto_with("/c", GotoOptions::unrecorded()).unwrap();
        assert_eq!(nav.history(), &[p("/a"), p("/c")]);
        assert!(consistent(&nav));
    }

    #[test]
    fn test_unrecorded_goto_to_previous_entry_merges() {
        let mut nav = Navigator::new(tree(), "/a").unwrap();
        nav.goto("/b").unwrap();
        nav.goto_with("/a", GotoOptions::unrecorded()).unwrap();
        assert_eq!(nav.history(), &[p("/a")]);
        assert!(!nav.can_go_back());
        assert!(consistent(&nav));
    }

    #[test]
    fn test_back_to_vanished_directory() {
        let fs = tree();
        let mut nav = Navigator::new(fs.clone(), "/a").unwrap();
        nav.goto("/b").unwrap();
        fs.remove("/a");

        let err = nav.back().unwrap_err();
        assert!(matches!(err, NavError::InvalidTarget { .. }));
        assert_eq!(nav.current_path(), Path::new("/b"));
        assert_eq!(nav.history_cursor(), 1);
    }

    #[test]
    fn test_show_hidden_relists_without_history() {
        let mut nav = Navigator::new(tree(), "/home/ana").unwrap();
        assert_eq!(nav.list_current().names(), vec!["Downloads", "notes.txt"]);

        let listing = nav.set_show_hidden(true);
        assert_eq!(listing.names(), vec![".config", "Downloads", "notes.txt"]);
        assert_eq!(nav.history().len(), 1);

        let listing = nav.toggle_show_hidden();
        assert!(!nav.show_hidden());
        assert_eq!(listing.names(), vec!["Downloads", "notes.txt"]);
    }

    #[test]
    fn test_listing_failure_still_navigates() {
        let fs = tree();
        fs.deny("/c");
        let mut nav = Navigator::new(fs, "/a").unwrap();
        let listing = nav.goto("/c").unwrap();
        assert_eq!(nav.current_path(), Path::new("/c"));
        assert!(listing.entries.is_empty());
        assert!(matches!(listing.error, Some(NavError::ListingFailed { .. })));
    }

    #[test]
    fn test_start_path_must_be_directory() {
        assert!(Navigator::new(tree(), "/home/ana/notes.txt").is_err());
        let nav = Navigator::new(tree(), "/home/ana/./Downloads/..").unwrap();
        assert_eq!(nav.current_path(), Path::new("/home/ana"));
    }
}

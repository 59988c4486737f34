use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::entry::DirectoryEntry;
use crate::error::NavError;
use crate::io::{FileSystem, IoResult, Listing, ListingWorker};
use crate::navigator::{GotoOptions, Move, Navigator};
use crate::state::{SelectionMode, SelectionSet};
use crate::view::View;

/// What activating (double-clicking) an entry did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The entry was a directory and is now the current path.
    Entered,
    /// The entry is a file; the caller decides how to open it.
    Open(PathBuf),
}

/// Ties a [`Navigator`] and a [`SelectionSet`] to the view that displays them.
///
/// All calls are expected from one thread. Errors are returned and also
/// reported to the view with `on_navigation_error`.
pub struct Browser<F, V> {
    navigator: Navigator<F>,
    selection: SelectionSet,
    view: V,
    entries: Vec<DirectoryEntry>,
    worker: Option<ListingWorker>,
    ticket: u64,
    pending: Option<u64>,
}

impl<F, V> Browser<F, V>
where
    F: FileSystem + Send + Sync + 'static,
    V: View,
{
    /// Lists directories on a background thread. Results are applied by
    /// [`Browser::poll_listings`] or [`Browser::wait_listing`].
    pub fn with_background_listing(mut self) -> Self {
        self.worker = Some(ListingWorker::spawn(self.navigator.fs().clone()));
        self
    }
}

impl<F: FileSystem, V: View> Browser<F, V> {
    pub fn new(navigator: Navigator<F>, selection: SelectionSet, view: V) -> Self {
        Self {
            navigator,
            selection,
            view,
            entries: Vec::new(),
            worker: None,
            ticket: 0,
            pending: None,
        }
    }

    /// Shows the start location.
    pub fn start(&mut self) {
        self.view.on_path_changed(self.navigator.current_path());
        self.relist();
    }

    pub fn navigator(&self) -> &Navigator<F> {
        &self.navigator
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn current_path(&self) -> &Path {
        self.navigator.current_path()
    }

    /// The listing last applied for the current path.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn is_listing_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn goto(&mut self, path: impl AsRef<Path>) -> Result<(), NavError> {
        self.goto_with(path, GotoOptions::default())
    }

    pub fn goto_with(
        &mut self,
        path: impl AsRef<Path>,
        options: GotoOptions,
    ) -> Result<(), NavError> {
        self.navigate(Move::Goto(path.as_ref().to_path_buf(), options))
    }

    pub fn back(&mut self) -> Result<(), NavError> {
        self.navigate(Move::Back)
    }

    pub fn forward(&mut self) -> Result<(), NavError> {
        self.navigate(Move::Forward)
    }

    pub fn up(&mut self) -> Result<(), NavError> {
        self.navigate(Move::Up)
    }

    pub fn goto_home(&mut self) -> Result<(), NavError> {
        self.navigate(Move::Home)
    }

    /// Re-lists the current directory. History is untouched.
    pub fn refresh(&mut self) {
        self.relist();
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.navigator.set_hidden_flag(show_hidden);
        self.relist();
    }

    pub fn toggle_show_hidden(&mut self) {
        let show_hidden = !self.navigator.show_hidden();
        self.set_show_hidden(show_hidden);
    }

    /// Reacts to a watcher event: a change in the current directory re-lists it.
    pub fn handle_fs_event(&mut self, path: &Path) -> bool {
        if path != self.navigator.current_path() {
            return false;
        }
        tracing::debug!(path = %path.display(), "directory changed on disk");
        self.relist();
        true
    }

    /// Directories are entered, files are handed back as [`Activation::Open`].
    pub fn activate(&mut self, name: &str) -> Result<Activation, NavError> {
        let entry = self.listed(name)?.clone();
        if entry.is_dir() {
            self.goto_with(&entry.name, GotoOptions::relative())?;
            Ok(Activation::Entered)
        } else {
            let path = self
                .navigator
                .fs()
                .join(self.navigator.current_path(), Path::new(&entry.name));
            Ok(Activation::Open(path))
        }
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        let changed = self.selection.set_mode(mode);
        self.selection_updated(changed);
    }

    pub fn select(&mut self, name: &str) -> Result<(), NavError> {
        self.listed(name)?;
        let changed = self.selection.select(name);
        self.selection_updated(changed);
        Ok(())
    }

    pub fn deselect(&mut self, name: &str) {
        let changed = self.selection.deselect(name);
        self.selection_updated(changed);
    }

    pub fn deselect_all(&mut self) {
        let changed = self.selection.deselect_all();
        self.selection_updated(changed);
    }

    pub fn toggle(&mut self, name: &str) -> Result<(), NavError> {
        self.listed(name)?;
        let changed = self.selection.toggle(name);
        self.selection_updated(changed);
        Ok(())
    }

    /// `modifier` is whatever the view treats as "add to selection".
    pub fn click(&mut self, name: &str, modifier: bool) -> Result<(), NavError> {
        self.listed(name)?;
        let changed = self.selection.click(name, modifier);
        self.selection_updated(changed);
        Ok(())
    }

    pub fn click_background(&mut self) {
        let changed = self.selection.click_background();
        self.selection_updated(changed);
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.is_selected(name)
    }

    /// Applies background listings that have arrived. Results for anything
    /// but the latest request for the current path are dropped.
    pub fn poll_listings(&mut self) -> bool {
        let results = match &self.worker {
            Some(worker) => worker.drain(),
            None => return false,
        };
        let mut applied = false;
        for result in results {
            applied |= self.accept(result);
        }
        applied
    }

    /// Blocks until the pending listing is applied or `timeout` passes.
    /// Returns whether nothing is pending afterwards.
    pub fn wait_listing(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            let result = match &self.worker {
                Some(worker) => worker.recv_timeout(remaining),
                None => return false,
            };
            match result {
                Some(result) => {
                    self.accept(result);
                }
                None => return false,
            }
        }
        true
    }

    fn navigate(&mut self, mv: Move) -> Result<(), NavError> {
        if let Err(err) = self.navigator.apply(mv) {
            self.report(&err);
            return Err(err);
        }
        self.view.on_path_changed(self.navigator.current_path());
        self.relist();
        Ok(())
    }

    fn relist(&mut self) {
        if self.request_listing() {
            return;
        }
        let listing = self.navigator.list_current();
        self.apply_listing(listing);
    }

    fn request_listing(&mut self) -> bool {
        let Some(worker) = &self.worker else {
            return false;
        };
        self.ticket += 1;
        let path = self.navigator.current_path().to_path_buf();
        if !worker.request(self.ticket, path, self.navigator.show_hidden()) {
            tracing::warn!("listing worker is gone, listing inline");
            self.worker = None;
            return false;
        }
        self.pending = Some(self.ticket);
        // Old names mean nothing in the new directory.
        self.entries.clear();
        let changed = self.selection.deselect_all();
        self.selection_updated(changed);
        true
    }

    fn accept(&mut self, result: IoResult) -> bool {
        match result {
            IoResult::DirectoryLoaded { ticket, listing } => {
                if self.pending != Some(ticket) || listing.path != self.navigator.current_path() {
                    tracing::debug!(ticket, path = %listing.path.display(), "discarding stale listing");
                    return false;
                }
                self.pending = None;
                self.apply_listing(listing);
                true
            }
        }
    }

    fn apply_listing(&mut self, listing: Listing) {
        let Listing { entries, error, .. } = listing;
        if let Some(err) = error {
            self.report(&err);
        }
        self.entries = entries;
        self.view.on_listing_changed(&self.entries);
        let changed = self.selection.deselect_all();
        self.selection_updated(changed);
    }

    fn listed(&mut self, name: &str) -> Result<&DirectoryEntry, NavError> {
        match self.entries.iter().position(|e| e.name == name) {
            Some(idx) => Ok(&self.entries[idx]),
            None => {
                let err = NavError::UnknownEntry(name.to_string());
                self.report(&err);
                Err(err)
            }
        }
    }

    fn selection_updated(&mut self, changed: bool) {
        if changed {
            self.view.on_selection_changed(&self.selection.selected());
        }
    }

    fn report(&mut self, err: &NavError) {
        if err.is_no_op() {
            tracing::info!("{}", err);
        } else {
            tracing::warn!("{}", err);
        }
        self.view.on_navigation_error(&err.to_string());
    }
}

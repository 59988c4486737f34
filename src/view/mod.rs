use std::collections::BTreeSet;
use std::path::Path;

use crate::entry::DirectoryEntry;

pub mod terminal;

pub use terminal::TerminalView;

/// Receives refresh notifications from a [`crate::Browser`].
///
/// A view decides how to draw; it never owns navigation or selection truth.
pub trait View {
    fn on_path_changed(&mut self, path: &Path);
    fn on_listing_changed(&mut self, entries: &[DirectoryEntry]);
    fn on_selection_changed(&mut self, selected: &BTreeSet<String>);
    fn on_navigation_error(&mut self, message: &str);
}

/// Everything a view was told, in order. Handy for tests and headless use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    PathChanged(String),
    ListingChanged(Vec<String>),
    SelectionChanged(Vec<String>),
    NavigationError(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl View for RecordingView {
    fn on_path_changed(&mut self, path: &Path) {
        self.events
            .push(ViewEvent::PathChanged(path.display().to_string()));
    }

    fn on_listing_changed(&mut self, entries: &[DirectoryEntry]) {
        self.events.push(ViewEvent::ListingChanged(
            entries.iter().map(|e| e.name.clone()).collect(),
        ));
    }

    fn on_selection_changed(&mut self, selected: &BTreeSet<String>) {
        self.events
            .push(ViewEvent::SelectionChanged(selected.iter().cloned().collect()));
    }

    fn on_navigation_error(&mut self, message: &str) {
        self.events
            .push(ViewEvent::NavigationError(message.to_string()));
    }
}

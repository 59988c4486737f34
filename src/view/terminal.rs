// Line-oriented view used by the shell binary
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

use super::View;
use crate::entry::DirectoryEntry;

pub struct TerminalView<W: Write> {
    out: W,
    entries: Vec<DirectoryEntry>,
    selected: BTreeSet<String>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entries: Vec::new(),
            selected: BTreeSet::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Prints the current listing, marking selected entries with `*`.
    pub fn print_listing(&mut self) {
        if self.entries.is_empty() {
            let _ = writeln!(self.out, "  (empty)");
            return;
        }
        for entry in &self.entries {
            let mark = if self.selected.contains(&entry.name) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(self.out, "{} {}", mark, entry.display_name());
        }
    }

    pub fn print_line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{}", line);
    }

    pub fn prompt(&mut self) {
        let _ = write!(self.out, "> ");
        let _ = self.out.flush();
    }
}

impl<W: Write> View for TerminalView<W> {
    fn on_path_changed(&mut self, path: &Path) {
        let _ = writeln!(self.out, "[{}]", path.display());
    }

    fn on_listing_changed(&mut self, entries: &[DirectoryEntry]) {
        self.entries = entries.to_vec();
        self.print_listing();
    }

    fn on_selection_changed(&mut self, selected: &BTreeSet<String>) {
        self.selected = selected.clone();
        if selected.is_empty() {
            let _ = writeln!(self.out, "selection cleared");
        } else {
            let names: Vec<&str> = selected.iter().map(String::as_str).collect();
            let _ = writeln!(self.out, "selected: {}", names.join(", "));
        }
    }

    fn on_navigation_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "! {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    fn output(view: &TerminalView<Vec<u8>>) -> String {
        String::from_utf8_lossy(view.writer()).to_string()
    }

    #[test]
    fn test_listing_marks_selection() {
        let mut view = TerminalView::new(Vec::new());
        view.on_listing_changed(&[
            DirectoryEntry::new("src", EntryKind::Directory),
            DirectoryEntry::new("main.rs", EntryKind::File),
        ]);
        view.on_selection_changed(&BTreeSet::from(["main.rs".to_string()]));
        view.print_listing();

        assert_eq!(
            output(&view),
            "  src/\n  main.rs\nselected: main.rs\n  src/\n* main.rs\n"
        );
    }

    #[test]
    fn test_path_and_error_lines() {
        let mut view = TerminalView::new(Vec::new());
        view.on_path_changed(Path::new("/tmp"));
        view.on_navigation_error("cannot go back");
        view.on_listing_changed(&[]);
        assert_eq!(output(&view), "[/tmp]\n! cannot go back\n  (empty)\n");
    }
}

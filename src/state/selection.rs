// Selection state - which entries of the current listing are highlighted
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multiple" | "multi" => Ok(SelectionMode::Multiple),
            other => Err(format!("unknown selection mode: {}", other)),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Single => f.write_str("single"),
            SelectionMode::Multiple => f.write_str("multiple"),
        }
    }
}

/// Selected entry names. In `Single` mode at most one name is held.
///
/// Mutators return whether the set changed.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    mode: SelectionMode,
    // Oldest selection first.
    selected: Vec<String>,
}

impl SelectionSet {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switching to `Single` keeps only the most recently selected entry.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            let keep = self.selected.split_off(self.selected.len() - 1);
            self.selected = keep;
            return true;
        }
        false
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.push(id.to_string());
        true
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    pub fn deselect_all(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    /// A click on an entry. Without `modifier` the selection becomes exactly
    /// `{id}` in either mode, with it in `Multiple` mode `id` is toggled.
    pub fn click(&mut self, id: &str, modifier: bool) -> bool {
        if modifier && self.mode == SelectionMode::Multiple {
            return self.toggle(id);
        }
        if self.selected.len() == 1 && self.selected[0] == id {
            return false;
        }
        self.selected.clear();
        self.selected.push(id.to_string());
        true
    }

    /// A click on empty background.
    pub fn click_background(&mut self) -> bool {
        self.deselect_all()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Sorted snapshot for the view.
    pub fn selected(&self) -> BTreeSet<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

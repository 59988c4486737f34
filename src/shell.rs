use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use crate::browser::{Activation, Browser};
use crate::command::{Command, HELP};
use crate::config::{find_bookmark, Bookmark};
use crate::io::FileSystem;
use crate::subscription::DirectoryWatcher;
use crate::view::TerminalView;

const LISTING_WAIT: Duration = Duration::from_secs(2);

pub type Opener = Box<dyn FnMut(&Path) -> io::Result<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line and drives a [`Browser`] with them.
pub struct Shell<F, W: Write> {
    browser: Browser<F, TerminalView<W>>,
    bookmarks: Vec<Bookmark>,
    watcher: Option<DirectoryWatcher>,
    opener: Opener,
}

impl<F: FileSystem, W: Write> Shell<F, W> {
    pub fn new(browser: Browser<F, TerminalView<W>>, bookmarks: Vec<Bookmark>) -> Self {
        Self {
            browser,
            bookmarks,
            watcher: None,
            opener: Box::new(|path: &Path| open::that(path)),
        }
    }

    pub fn with_watcher(mut self, watcher: DirectoryWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Replaces the system "open with default application" call.
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn browser(&self) -> &Browser<F, TerminalView<W>> {
        &self.browser
    }

    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        self.browser.start();
        self.settle();
        self.browser.view_mut().prompt();

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command) == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => self.print(&format!("! {}", e)),
            }
            self.poll_events();
            self.browser.view_mut().prompt();
        }
        Ok(())
    }

    /// Errors from the browser have already been shown by the view, so they
    /// are dropped here.
    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Goto(path) => {
                let _ = self.browser.goto(&path);
            }
            Command::Open(name) => self.open(&name),
            Command::Back => {
                let _ = self.browser.back();
            }
            Command::Forward => {
                let _ = self.browser.forward();
            }
            Command::Up => {
                let _ = self.browser.up();
            }
            Command::Home => {
                let _ = self.browser.goto_home();
            }
            Command::Refresh => self.browser.refresh(),
            Command::Bookmark(name) => self.goto_bookmark(&name),
            Command::List => self.browser.view_mut().print_listing(),
            Command::ToggleHidden => self.browser.toggle_show_hidden(),
            Command::History => self.print_history(),
            Command::Bookmarks => {
                let home = self.browser.navigator().fs().home_directory();
                let lines: Vec<String> = self
                    .bookmarks
                    .iter()
                    .map(|b| match b.resolved(home.as_deref()) {
                        Some(path) => format!("  {:<16} {}", b.name, path.display()),
                        None => format!("  {:<16} {}", b.name, b.path),
                    })
                    .collect();
                for line in lines {
                    self.print(&line);
                }
            }
            Command::SetMode(mode) => {
                self.browser.set_selection_mode(mode);
                self.print(&format!("selection mode: {}", mode));
            }
            Command::Click { name, modifier } => {
                let _ = self.browser.click(&name, modifier);
            }
            Command::Select(name) => {
                let _ = self.browser.select(&name);
            }
            Command::Deselect(name) => self.browser.deselect(&name),
            Command::Toggle(name) => {
                let _ = self.browser.toggle(&name);
            }
            Command::ClearSelection => self.browser.click_background(),
            Command::Help => self.print(HELP),
            Command::Quit => return Flow::Quit,
        }
        self.settle();
        Flow::Continue
    }

    fn open(&mut self, name: &str) {
        if let Ok(Activation::Open(path)) = self.browser.activate(name) {
            tracing::info!(path = %path.display(), "opening file");
            if let Err(e) = (self.opener)(&path) {
                self.print(&format!("! could not open {}: {}", path.display(), e));
            }
        }
    }

    fn goto_bookmark(&mut self, name: &str) {
        let target = find_bookmark(&self.bookmarks, name).map(|b| b.path.clone());
        match target {
            Some(path) => {
                let _ = self.browser.goto(&path);
            }
            None => self.print(&format!("! no bookmark named {}", name)),
        }
    }

    fn print_history(&mut self) {
        let navigator = self.browser.navigator();
        let cursor = navigator.history_cursor();
        let lines: Vec<String> = navigator
            .history()
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let mark = if idx == cursor { '>' } else { ' ' };
                format!("{} {}", mark, path.display())
            })
            .collect();
        for line in lines {
            self.print(&line);
        }
    }

    /// Waits briefly for a background listing and points the watcher at the
    /// current directory.
    fn settle(&mut self) {
        if self.browser.is_listing_pending() && !self.browser.wait_listing(LISTING_WAIT) {
            self.print("(still listing)");
        }
        if let Some(watcher) = &mut self.watcher {
            if let Err(e) = watcher.watch(self.browser.current_path()) {
                tracing::warn!(error = %e, "cannot watch current directory");
            }
        }
    }

    fn poll_events(&mut self) {
        let changed = self.watcher.as_ref().and_then(DirectoryWatcher::changed);
        if let Some(path) = changed {
            self.browser.handle_fs_event(&path);
        }
        self.browser.poll_listings();
    }

    fn print(&mut self, line: &str) {
        self.browser.view_mut().print_line(line);
    }
}

use anyhow::Context;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use fmshell::config::Config;
use fmshell::io::{FileSystem, OsFileSystem};
use fmshell::shell::Shell;
use fmshell::subscription::DirectoryWatcher;
use fmshell::view::TerminalView;
use fmshell::{Browser, Navigator, SelectionSet};

fn init_logging() {
    // Logs go to stderr so they do not interleave with the listing on stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Configured start path, then home, then the working directory.
fn open_navigator(fs: &Arc<OsFileSystem>, config: &Config) -> anyhow::Result<Navigator<OsFileSystem>> {
    let start = config
        .ui
        .start_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| fs.home_directory());

    if let Some(start) = start {
        match Navigator::new(fs.clone(), &start) {
            Ok(navigator) => return Ok(navigator),
            Err(e) => tracing::warn!("{}; starting in the working directory", e),
        }
    }
    let cwd = fs
        .working_directory()
        .context("no usable start directory")?;
    Navigator::new(fs.clone(), cwd).context("no usable start directory")
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::load();
    let fs = Arc::new(OsFileSystem::new());
    let navigator = open_navigator(&fs, &config)?.with_show_hidden(config.ui.show_hidden);

    let mut browser = Browser::new(
        navigator,
        SelectionSet::new(config.selection_mode()),
        TerminalView::stdout(),
    );
    if config.listing.background {
        browser = browser.with_background_listing();
    }

    let mut shell = Shell::new(browser, config.bookmarks.clone());
    if config.listing.watch {
        match DirectoryWatcher::new() {
            Ok(watcher) => shell = shell.with_watcher(watcher),
            Err(e) => tracing::warn!(error = %e, "file watching unavailable"),
        }
    }

    let stdin = io::stdin();
    shell.run(stdin.lock()).context("reading commands")?;
    Ok(())
}

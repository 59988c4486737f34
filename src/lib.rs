pub mod browser;
pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod io;
pub mod navigator;
pub mod shell;
pub mod state;
pub mod subscription;
pub mod view;

pub use browser::{Activation, Browser};
pub use entry::{DirectoryEntry, EntryKind};
pub use error::{Direction, NavError};
pub use navigator::{GotoOptions, Navigator};
pub use state::{SelectionMode, SelectionSet};
pub use view::View;

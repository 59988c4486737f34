// Commands accepted by the shell, one per input line
use thiserror::Error;

use crate::state::SelectionMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Goto(String),
    Open(String),
    Back,
    Forward,
    Up,
    Home,
    Refresh,
    Bookmark(String),

    // Listing
    List,
    ToggleHidden,
    History,
    Bookmarks,

    // Selection
    SetMode(SelectionMode),
    Click { name: String, modifier: bool },
    Select(String),
    Deselect(String),
    Toggle(String),
    ClearSelection,

    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  cd <path>            go to a directory (~ expands to home)
  open <name>          enter a directory or open a file
  back | forward | up | home
  refresh              re-list the current directory
  bm <name>            go to a bookmark
  bookmarks            list bookmarks
  ls                   print the listing
  hidden               toggle hidden files
  history              print navigation history
  mode single|multiple
  click <name> [+]     click an entry, + adds to a multiple selection
  select|deselect|toggle <name>
  clear                click the background
  help | quit";

impl Command {
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Ok(None);
        }

        let command = match word {
            "cd" | "goto" => Command::Goto(required(rest, "cd <path>")?),
            "open" => Command::Open(required(rest, "open <name>")?),
            "back" | "b" => Command::Back,
            "forward" | "f" => Command::Forward,
            "up" | ".." => Command::Up,
            "home" | "~" => Command::Home,
            "refresh" | "r" => Command::Refresh,
            "bm" => Command::Bookmark(required(rest, "bm <name>")?),
            "ls" => Command::List,
            "hidden" | "." => Command::ToggleHidden,
            "history" => Command::History,
            "bookmarks" => Command::Bookmarks,
            "mode" => {
                let mode = rest
                    .parse()
                    .map_err(|_| ParseError::Usage("mode single|multiple"))?;
                Command::SetMode(mode)
            }
            "click" => {
                let (name, modifier) = match rest.strip_suffix(" +") {
                    Some(name) => (name.trim_end(), true),
                    None => (rest, false),
                };
                Command::Click {
                    name: required(name, "click <name> [+]")?,
                    modifier,
                }
            }
            "select" => Command::Select(required(rest, "select <name>")?),
            "deselect" => Command::Deselect(required(rest, "deselect <name>")?),
            "toggle" => Command::Toggle(required(rest, "toggle <name>")?),
            "clear" => Command::ClearSelection,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required(arg: &str, usage: &'static str) -> Result<String, ParseError> {
    if arg.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(parse("cd ~/My Documents"), Command::Goto("~/My Documents".into()));
        assert_eq!(parse("  back "), Command::Back);
        assert_eq!(parse(".."), Command::Up);
        assert_eq!(parse("bm Downloads"), Command::Bookmark("Downloads".into()));
    }

    #[test]
    fn test_click_modifier() {
        assert_eq!(
            parse("click a.txt"),
            Command::Click {
                name: "a.txt".into(),
                modifier: false
            }
        );
        assert_eq!(
            parse("click a.txt +"),
            Command::Click {
                name: "a.txt".into(),
                modifier: true
            }
        );
        assert_eq!(
            parse("click c++"),
            Command::Click {
                name: "c++".into(),
                modifier: false
            }
        );
        assert_eq!(
            Command::parse("click"),
            Err(ParseError::Usage("click <name> [+]"))
        );
    }

    #[test]
    fn test_mode() {
        assert_eq!(parse("mode multiple"), Command::SetMode(SelectionMode::Multiple));
        assert!(Command::parse("mode").is_err());
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(
            Command::parse("rm -rf /"),
            Err(ParseError::Unknown("rm".into()))
        );
        assert_eq!(Command::parse("cd"), Err(ParseError::Usage("cd <path>")));
    }
}

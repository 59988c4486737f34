use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which way a history move was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Back => f.write_str("back"),
            Direction::Forward => f.write_str("forward"),
        }
    }
}

/// Conditions reported at the navigation boundary. None of them are fatal.
#[derive(Debug, Error)]
pub enum NavError {
    /// The goto target is not an existing directory. State is unchanged.
    #[error("not a directory: {}", path.display())]
    InvalidTarget { path: PathBuf },

    /// The directory exists but could not be enumerated. The listing is empty.
    #[error("cannot list {}: {source}", path.display())]
    ListingFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// back/forward at the end of history. A no-op.
    #[error("cannot go {0}")]
    HistoryExhausted(Direction),

    #[error("no home directory could be determined")]
    NoHomeDirectory,

    /// A selection or activation named something not in the current listing.
    #[error("no such entry: {0}")]
    UnknownEntry(String),
}

impl NavError {
    /// True for the conditions that are reported but change nothing.
    pub fn is_no_op(&self) -> bool {
        matches!(self, NavError::HistoryExhausted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            NavError::HistoryExhausted(Direction::Back).to_string(),
            "cannot go back"
        );
        assert_eq!(
            NavError::InvalidTarget {
                path: PathBuf::from("/etc/passwd")
            }
            .to_string(),
            "not a directory: /etc/passwd"
        );
        let err = NavError::ListingFailed {
            path: PathBuf::from("/root"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "cannot list /root: denied");
    }

    #[test]
    fn test_history_exhausted_is_no_op() {
        assert!(NavError::HistoryExhausted(Direction::Forward).is_no_op());
        assert!(!NavError::NoHomeDirectory.is_no_op());
    }
}

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::directory::Listing;
use super::fs::FileSystem;

pub enum IoCommand {
    LoadDirectory {
        ticket: u64,
        path: PathBuf,
        show_hidden: bool,
    },
}

pub enum IoResult {
    DirectoryLoaded { ticket: u64, listing: Listing },
}

/// Background thread that enumerates directories.
///
/// Requests queued while a listing is in progress collapse to the newest one,
/// so superseded tickets may never be answered.
pub struct ListingWorker {
    cmd_tx: Sender<IoCommand>,
    res_rx: Receiver<IoResult>,
}

impl ListingWorker {
    pub fn spawn<F>(fs: Arc<F>) -> Self
    where
        F: FileSystem + Send + Sync + 'static,
    {
        let (cmd_tx, cmd_rx) = channel::<IoCommand>();
        let (res_tx, res_rx) = channel();

        thread::spawn(move || {
            while let Ok(mut cmd) = cmd_rx.recv() {
                while let Ok(newer) = cmd_rx.try_recv() {
                    cmd = newer;
                }
                match cmd {
                    IoCommand::LoadDirectory {
                        ticket,
                        path,
                        show_hidden,
                    } => {
                        let listing = Listing::load(fs.as_ref(), &path, show_hidden);
                        if res_tx
                            .send(IoResult::DirectoryLoaded { ticket, listing })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("listing worker stopped");
        });

        Self { cmd_tx, res_rx }
    }

    /// Queues a listing. Returns false if the worker thread is gone.
    pub fn request(&self, ticket: u64, path: PathBuf, show_hidden: bool) -> bool {
        self.cmd_tx
            .send(IoCommand::LoadDirectory {
                ticket,
                path,
                show_hidden,
            })
            .is_ok()
    }

    /// Every result that has arrived so far, without blocking.
    pub fn drain(&self) -> Vec<IoResult> {
        self.res_rx.try_iter().collect()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<IoResult> {
        match self.res_rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

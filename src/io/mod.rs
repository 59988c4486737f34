mod directory;
mod fs;
mod memory;
pub mod path;
mod worker;

pub use directory::{read_listing, Listing};
pub use fs::{FileSystem, OsFileSystem};
pub use memory::MemoryFileSystem;
pub use worker::{IoCommand, IoResult, ListingWorker};

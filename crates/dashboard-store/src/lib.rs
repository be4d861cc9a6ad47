//! dashboard-store - Filesystem-backed credential store.

mod file;

pub use file::FileTokenStore;

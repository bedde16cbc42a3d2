//! folio-file - File-backed key-value store for folio.
//!
//! [`FileStore`] keeps the persisted session in a single JSON file so it
//! survives process restarts.

mod store;

pub use store::FileStore;

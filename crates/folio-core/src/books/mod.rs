//! Book catalog types.
//!
//! [`BookDraft`] and [`BookPatch`] carry the form-level validation rules the
//! catalog expects before a create or update request is sent.

mod types;

pub use types::{Book, BookDraft, BookPatch, EARLIEST_PUBLICATION_YEAR};

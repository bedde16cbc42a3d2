//! Collaborator traits consumed by the session manager.

mod auth;
mod store;

pub use auth::AuthService;
pub use store::KeyValueStore;

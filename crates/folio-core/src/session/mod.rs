//! Session lifecycle: hydration, installation, background renewal, teardown.
//!
//! The [`SessionManager`] is the single owner of the authenticated session in
//! a process. Consumers read immutable [`SessionState`] snapshots and react to
//! [`Route`] signals; only the manager mutates the session.

mod clock;
mod manager;
pub mod persist;
mod state;

pub use clock::{Clock, SystemClock};
pub use manager::SessionManager;
pub use state::{RENEWAL_LEAD, Route, Session, SessionState, renewal_delay};

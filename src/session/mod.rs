//! Session guard: authentication state, its four mutating operations, and
//! the role hierarchy.
//!
//! DESIGN
//! ======
//! All mutation of the session funnels through
//! [`SessionStore`]'s initialize/login/logout/change-password; consumers
//! only read cloned [`SessionState`] snapshots. Roles are an ordered enum
//! so the admin ⊇ manager ⊇ operator containment is structural.

pub mod role;
pub mod store;

pub use role::Role;
pub use store::{AuthTransport, SessionState, SessionStore};

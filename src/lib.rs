//! # regdash
//!
//! Client core for the municipal property-regularization dashboard.
//! The dashboard itself is a thin presentation layer over a REST backend;
//! this crate carries the two pieces with contractual behavior:
//!
//! - [`net`]: the API gateway client every domain service call passes
//!   through: uniform request construction, explicit session credential,
//!   JSON/multipart encoding, and error normalization.
//! - [`session`]: the session guard: current-user state, the
//!   initialize/login/logout/change-password transitions, and the role
//!   hierarchy.
//! - [`routes`]: the pure route-guard decision gating navigation to
//!   protected content.

pub mod config;
pub mod net;
pub mod routes;
pub mod session;

pub use config::ClientConfig;
pub use net::{ApiClient, ApiError, ErrorKind};
pub use routes::GuardDecision;
pub use session::{Role, SessionState, SessionStore};

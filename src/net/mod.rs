//! REST gateway to the regularization API.
//!
//! DESIGN
//! ======
//! Every domain service call goes through one request path
//! ([`ApiClient::request`]) so headers, the session credential, and error
//! normalization are uniform. Domain groups (auth, users, properties,
//! steps, step records, documents, dashboard) live in [`services`] as thin
//! typed wrappers.

pub mod api;
pub mod error;
pub mod services;
pub mod types;

pub use api::ApiClient;
pub use error::{ApiError, ErrorKind};

//! Server-side sessions and the login/logout lifecycle.

pub mod manager;
pub mod store;

pub use manager::{LoginResult, SessionManager};
pub use store::{Session, SessionStore};

//! # tirehub-auth
//!
//! Authentication and authorization for TireHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the minimum-length policy
//! - `jwt`: HS256 token claims, encoding and decoding
//! - `session`: server-side session store and the login/logout lifecycle
//! - `rbac`: the static route table and role enforcement

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Access, RbacEnforcer, RoutePolicies};
pub use session::{LoginResult, Session, SessionManager, SessionStore};

//! Tire request domain entities.

pub mod model;
pub mod status;

pub use model::{CommentEntry, TireDetails, TireRequest};
pub use status::{Decision, TireRequestStatus};

//! Core traits defined in `tirehub-core` and implemented by other crates.

pub mod repository;
pub mod storage;

pub use repository::Repository;
pub use storage::{Attachment, ByteStream, ImageResource, ImageStore};

//! # tirehub-storage
//!
//! Image storage for tire requests. Files live one directory per request id
//! under a configured root and are named with random tokens, so client file
//! names never reach the filesystem.

pub mod local;
pub mod path;

pub use local::LocalImageStore;

//! Hashing primitives and error types

pub mod digester;
pub mod error;

pub use digester::{digest_bytes, digest_file, FileDigest};
pub use error::{DedupError, Result};

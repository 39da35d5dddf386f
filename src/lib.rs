//! Upload a directory tree to an S3 bucket, optionally compressing every file and
//! deleting the objects that no longer exist locally.

pub mod cli;
pub mod error;
pub mod mime;
pub mod s3;
pub mod store;
pub mod stream;

pub use self::error::{Error, Result};

//! AWS S3 service limits
//!
//! # References
//! - [S3 Quotas](https://docs.aws.amazon.com/AmazonS3/latest/userguide/qfacts.html)
//! - [PutObject](https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html)

/// Maximum size of an object uploaded with a single PUT (5 GB)
///
/// Bigger objects require a multipart upload, which this tool does not do.
pub const MAX_PUT_OBJECT_SIZE_BYTES: u64 = 5_368_709_120;

/// Maximum length of an object key in bytes
pub const MAX_KEY_LENGTH_BYTES: usize = 1_024;

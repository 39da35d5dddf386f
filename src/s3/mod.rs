pub mod actions;
pub mod credentials;
pub mod limits;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;
pub use self::{credentials::Credentials, region::Region, signature::Signature};

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use std::fmt;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct S3 {
    // AWS Credentials
    credentials: Credentials,
    // AWS Region
    region: Region,
    // bucket name
    bucket: String,
    // connection pool shared by all the requests
    client: Client,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client can not be created
    pub fn new(credentials: &Credentials, region: &Region, bucket: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("could not create the HTTP client")?;

        Ok(Self {
            credentials: credentials.clone(),
            region: region.clone(),
            bucket: bucket.to_string(),
            client,
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Path-style URL of the bucket
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn endpoint(&self) -> Result<Url> {
        let endpoint = self.region.endpoint();
        let base = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint
        } else {
            format!("https://{endpoint}")
        };

        let mut url = Url::parse(&base).with_context(|| format!("invalid endpoint: {base}"))?;

        url.path_segments_mut()
            .map_err(|()| anyhow!("endpoint cannot be a base: {base}"))?
            .pop_if_empty()
            .push(&self.bucket);

        Ok(url)
    }
}

impl fmt::Display for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bucket: {}", self.bucket)?;
        writeln!(f, "region: {}", self.region.name())?;
        writeln!(f, "endpoint: {}", self.region.endpoint())?;
        write!(f, "access key: {}", self.credentials.aws_access_key_id())
    }
}

use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, limits::MAX_PUT_OBJECT_SIZE_BYTES, request, tools},
};
use anyhow::{Result, anyhow};
use bytes::Bytes;
use reqwest::{Body, Method};
use std::{collections::BTreeMap, path::PathBuf};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

/// What goes in the body of a `PutObject`
#[derive(Debug, Clone)]
pub enum ObjectBody {
    /// streamed from disk as is
    File(PathBuf),
    /// already in memory, for example after compression
    Bytes(Bytes),
}

impl ObjectBody {
    // sha256, md5 and length of the payload
    async fn digest(&self) -> Result<(Vec<u8>, Vec<u8>, usize)> {
        match self {
            Self::File(path) => {
                let (sha, md5, length) = tools::sha256_md5_digest(path).await?;
                Ok((sha.as_ref().to_vec(), md5.to_vec(), length))
            }
            Self::Bytes(bytes) => Ok((
                tools::sha256_digest(bytes).as_ref().to_vec(),
                md5::compute(bytes).to_vec(),
                bytes.len(),
            )),
        }
    }

    async fn into_body(self) -> Result<Body> {
        match self {
            Self::File(path) => {
                let file = File::open(&path).await?;
                Ok(Body::wrap_stream(FramedRead::new(file, BytesCodec::new())))
            }
            Self::Bytes(bytes) => Ok(Body::from(bytes)),
        }
    }
}

#[derive(Debug)]
pub struct PutObject<'a> {
    key: &'a str,
    body: &'a ObjectBody,
    acl: Option<&'a str>,
    content_type: Option<&'a str>,
    content_encoding: Option<&'a str>,
}

impl<'a> PutObject<'a> {
    #[must_use]
    pub const fn new(
        key: &'a str,
        body: &'a ObjectBody,
        acl: Option<&'a str>,
        content_type: Option<&'a str>,
        content_encoding: Option<&'a str>,
    ) -> Self {
        Self {
            key,
            body,
            acl,
            content_type,
            content_encoding,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the body is too big for a single PUT or the request fails
    pub async fn request(&self, s3: &S3) -> Result<BTreeMap<&str, String>> {
        let (sha, md5, length) = self.body.digest().await?;

        if length as u64 > MAX_PUT_OBJECT_SIZE_BYTES {
            return Err(anyhow!(
                "object size {length} exceeds the single PUT limit of {MAX_PUT_OBJECT_SIZE_BYTES} bytes"
            ));
        }

        let (url, headers) = &self.sign(s3, &sha, Some(&md5), Some(length))?;

        let response = request::request(
            s3.client(),
            url.clone(),
            self.http_method()?,
            headers,
            Some(self.body.clone().into_body().await?),
        )
        .await?;

        if response.status().is_success() {
            let mut h: BTreeMap<&str, String> = BTreeMap::new();
            if let Some(etag) = response.headers().get("ETag") {
                h.insert("ETag", etag.to_str()?.to_string());
            }
            if let Some(vid) = response.headers().get("x-amz-version-id") {
                h.insert("Version ID", vid.to_str()?.to_string());
            }
            Ok(h)
        } else {
            Err(anyhow!(response_error(response).await?))
        }
    }
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html>
impl Action for PutObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::from_bytes(b"PUT")?)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        // https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObjectAcl.html
        if let Some(acl) = self.acl {
            map.insert("x-amz-acl", acl);
        }

        if let Some(content_type) = self.content_type {
            map.insert("content-type", content_type);
        }

        if let Some(content_encoding) = self.content_encoding {
            map.insert("content-encoding", content_encoding);
        }

        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<&str> {
        Some(self.key)
    }
}

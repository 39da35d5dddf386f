//! The three bucket operations the upload and sync passes need

use crate::s3::{
    S3,
    actions::{DeleteObject, ListObjectsV2, ObjectBody, PutObject},
};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
    pub e_tag: Option<String>,
}

/// One page of a bucket listing
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub objects: Vec<ObjectSummary>,
    // None on the last page
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PutRequest {
    pub key: String,
    pub body: ObjectBody,
    pub acl: String,
    pub content_type: Option<&'static str>,
    pub content_encoding: Option<&'static str>,
}

#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    fn bucket(&self) -> &str;

    /// # Errors
    ///
    /// Will return `Err` if the object could not be stored
    async fn put_object(&self, request: &PutRequest) -> Result<()>;

    /// # Errors
    ///
    /// Will return `Err` if the page could not be fetched
    async fn list_objects(&self, continuation_token: Option<&str>) -> Result<ObjectPage>;

    /// # Errors
    ///
    /// Will return `Err` if the object could not be deleted
    async fn delete_object(&self, key: &str) -> Result<()>;
}

impl ObjectStore for S3 {
    fn bucket(&self) -> &str {
        Self::bucket(self)
    }

    async fn put_object(&self, request: &PutRequest) -> Result<()> {
        let action = PutObject::new(
            &request.key,
            &request.body,
            Some(request.acl.as_str()),
            request.content_type,
            request.content_encoding,
        );

        let response = action.request(self).await?;

        log::debug!("PUT {}: {response:?}", request.key);

        Ok(())
    }

    async fn list_objects(&self, continuation_token: Option<&str>) -> Result<ObjectPage> {
        let action = ListObjectsV2::new(continuation_token.map(ToString::to_string), None);

        let result = action.request(self).await?;

        log::debug!(
            "listed {} objects, truncated: {}",
            result.contents.len(),
            result.is_truncated
        );

        Ok(ObjectPage {
            objects: result
                .contents
                .into_iter()
                .map(|object| ObjectSummary {
                    key: object.key,
                    size: object.size,
                    last_modified: object.last_modified,
                    e_tag: object.e_tag,
                })
                .collect(),
            next_continuation_token: result.next_continuation_token,
        })
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        DeleteObject::new(key).request(self).await?;
        Ok(())
    }
}

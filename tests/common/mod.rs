//! Common test helpers
//!
//! - `MemoryStore`: an in-memory bucket with paging and failure injection
//! - tree helpers to build the local directory to upload

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use anyhow::{Result, anyhow};
use s3up::{
    cli::globals::GlobalArgs,
    s3::actions::ObjectBody,
    store::{ObjectPage, ObjectStore, ObjectSummary, PutRequest},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub acl: String,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
}

#[derive(Debug)]
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    page_size: usize,
    fail_put: Option<String>,
    fail_list: bool,
    fail_delete: Option<String>,
    pub puts: AtomicUsize,
    pub lists: AtomicUsize,
    pub deletes: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(BTreeMap::new()),
            page_size: 1_000,
            fail_put: None,
            fail_list: false,
            fail_delete: None,
            puts: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            deletes: Mutex::new(Vec::new()),
        }
    }

    /// Bucket already holding `keys`
    pub fn with_keys(bucket: &str, keys: &[&str]) -> Self {
        let store = Self::new(bucket);
        for key in keys {
            store.insert(key, b"remote");
        }
        store
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn fail_put(mut self, key: &str) -> Self {
        self.fail_put = Some(key.to_string());
        self
    }

    pub const fn fail_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn fail_delete(mut self, key: &str) -> Self {
        self.fail_delete = Some(key.to_string());
        self
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                acl: "private".to_string(),
                content_type: None,
                content_encoding: None,
            },
        );
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, request: &PutRequest) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);

        if self.fail_put.as_deref() == Some(request.key.as_str()) {
            return Err(anyhow!("HTTP Status Code: 500 Internal Server Error"));
        }

        let data = match &request.body {
            ObjectBody::File(path) => tokio::fs::read(path).await?,
            ObjectBody::Bytes(bytes) => bytes.to_vec(),
        };

        self.objects.lock().unwrap().insert(
            request.key.clone(),
            StoredObject {
                data,
                acl: request.acl.clone(),
                content_type: request.content_type.map(ToString::to_string),
                content_encoding: request.content_encoding.map(ToString::to_string),
            },
        );

        Ok(())
    }

    async fn list_objects(&self, continuation_token: Option<&str>) -> Result<ObjectPage> {
        self.lists.fetch_add(1, Ordering::SeqCst);

        if self.fail_list {
            return Err(anyhow!("HTTP Status Code: 503 Service Unavailable"));
        }

        // the token is the key to start after
        let objects = self.objects.lock().unwrap();
        let page: Vec<ObjectSummary> = objects
            .iter()
            .filter(|(key, _)| continuation_token.is_none_or(|token| key.as_str() > token))
            .take(self.page_size)
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.data.len() as u64,
                last_modified: None,
                e_tag: None,
            })
            .collect();

        let next_continuation_token = page.last().and_then(|last| {
            objects
                .keys()
                .any(|key| key > &last.key)
                .then(|| last.key.clone())
        });

        Ok(ObjectPage {
            objects: page,
            next_continuation_token,
        })
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        if self.fail_delete.as_deref() == Some(key) {
            return Err(anyhow!("HTTP Status Code: 403 Forbidden"));
        }

        self.objects.lock().unwrap().remove(key);
        self.deletes.lock().unwrap().push(key.to_string());

        Ok(())
    }
}

/// One attempt per request so failures don't wait for the backoff
pub fn globals(number: u8) -> GlobalArgs {
    let mut globals = GlobalArgs::new();
    globals.set_retries(1);
    globals.set_number(number);
    globals.quiet = true;
    globals
}

/// Write `files` (relative path, content) under `root`
pub fn create_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (path, content) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(&path, content).expect("Failed to write file");
    }
}

pub fn set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(ToString::to_string).collect()
}

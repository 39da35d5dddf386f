use crate::{
    cli::globals::GlobalArgs,
    error::Error,
    mime,
    s3::{actions::ObjectBody, limits::MAX_KEY_LENGTH_BYTES},
    store::{ObjectStore, PutRequest},
    stream::{
        UploadedKeySet, await_remaining_tasks, await_tasks,
        compression::{self, Compression, Payload},
        retry,
    },
};
use anyhow::anyhow;
use bytes::Bytes;
use futures::stream::FuturesUnordered;
use std::{
    fs::{self, File},
    path::{Component, Path, PathBuf},
};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    // local directory, its content lands at the root of the bucket
    pub root: PathBuf,
    pub compression: Compression,
    // canned ACL
    pub acl: String,
}

/// Regular files under `root`, symlinks are followed
///
/// # Errors
///
/// Will return `Err` if `root` is not a directory or a directory can not be read
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let traversal = |cause: anyhow::Error| Error::Traversal {
        root: root.to_path_buf(),
        cause,
    };

    let metadata = fs::metadata(root).map_err(|e| traversal(e.into()))?;
    if !metadata.is_dir() {
        return Err(traversal(anyhow!("not a directory")));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| traversal(e.into()))?;

        let file_type = entry.file_type();
        if file_type.is_file() {
            files.push(entry.into_path());
        } else if !file_type.is_dir() {
            log::warn!("skipping special file: {}", entry.path().display());
        }
    }

    Ok(files)
}

/// Object key of `path`: the path relative to `root` joined with `/`
///
/// # Errors
///
/// Will return `Err` if the path is outside `root`, is not valid UTF-8 or the key is too long
pub fn object_key(root: &Path, path: &Path) -> anyhow::Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| anyhow!("{} is not under {}", path.display(), root.display()))?;

    let key = relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => part
                .to_str()
                .ok_or_else(|| anyhow!("file name is not valid UTF-8: {}", path.display())),
            _ => Err(anyhow!("unexpected path component in {}", path.display())),
        })
        .collect::<anyhow::Result<Vec<&str>>>()?
        .join("/");

    if key.is_empty() {
        return Err(anyhow!("empty object key for {}", path.display()));
    }

    if key.len() > MAX_KEY_LENGTH_BYTES {
        return Err(anyhow!(
            "object key is {} bytes long, max is {MAX_KEY_LENGTH_BYTES}",
            key.len()
        ));
    }

    Ok(key)
}

// open and encode, blocking
fn prepare_body(
    path: &Path,
    compression: Compression,
) -> Result<(ObjectBody, Option<&'static str>), Error> {
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    match compression::wrap(file, compression).map_err(|source| Error::Compression {
        path: path.to_path_buf(),
        source,
    })? {
        // stream it from disk
        Payload::Raw(_) => Ok((ObjectBody::File(path.to_path_buf()), None)),

        Payload::Encoded {
            data,
            content_encoding,
        } => Ok((ObjectBody::Bytes(Bytes::from(data)), Some(content_encoding))),
    }
}

async fn upload_file<S: ObjectStore>(
    store: &S,
    options: &UploadOptions,
    globals: &GlobalArgs,
    path: PathBuf,
) -> Result<String, Error> {
    let key = object_key(&options.root, &path).map_err(|cause| Error::Upload {
        path: path.clone(),
        cause,
    })?;

    let (body, content_encoding) = {
        let file = path.clone();
        let compression = options.compression;
        tokio::task::spawn_blocking(move || prepare_body(&file, compression))
            .await
            .map_err(|e| Error::Compression {
                path: path.clone(),
                source: std::io::Error::other(e),
            })??
    };

    let request = PutRequest {
        key,
        body,
        acl: options.acl.clone(),
        content_type: mime::content_type(&path),
        content_encoding,
    };

    log::debug!(
        "uploading {} as {}, content-type: {:?}, content-encoding: {:?}",
        path.display(),
        request.key,
        request.content_type,
        request.content_encoding
    );

    let put = &request;
    retry(globals.retries, &format!("upload {}", put.key), move || {
        store.put_object(put)
    })
    .await
    .map_err(|cause| Error::Upload {
        path: path.clone(),
        cause,
    })?;

    if !globals.quiet {
        println!("{} was uploaded", path.display());
    }

    log::info!("uploaded {} to {}/{}", path.display(), store.bucket(), request.key);

    Ok(request.key)
}

/// Upload every regular file under `options.root`, the first failure stops the run
///
/// # Errors
///
/// Will return `Err` if the traversal, opening, compressing or uploading a file fails
pub async fn upload_dir<S: ObjectStore>(
    store: &S,
    options: &UploadOptions,
    globals: &GlobalArgs,
) -> Result<UploadedKeySet, Error> {
    // the whole tree is listed before the first upload
    let files = {
        let root = options.root.clone();
        tokio::task::spawn_blocking(move || collect_files(&root))
            .await
            .map_err(|e| Error::Traversal {
                root: options.root.clone(),
                cause: e.into(),
            })??
    };

    log::info!("{} files found in {}", files.len(), options.root.display());

    let mut uploaded = UploadedKeySet::new();
    let mut tasks = FuturesUnordered::new();

    for path in files {
        tasks.push(upload_file(store, options, globals, path));

        await_tasks(&mut tasks, globals.number, |key| {
            uploaded.insert(key);
        })
        .await?;
    }

    // wait for the remaining uploads
    await_remaining_tasks(&mut tasks, |key| {
        uploaded.insert(key);
    })
    .await?;

    Ok(uploaded)
}

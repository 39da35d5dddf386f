use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    error::Error,
    store::ObjectStore,
    stream::{
        sync::sync_bucket,
        upload_dir::{UploadOptions, upload_dir},
    },
};

/// What a run did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub uploaded: usize,
    // None when sync was not requested
    pub deleted: Option<usize>,
}

/// Upload the directory, then remove the orphaned objects if `sync` is set
///
/// # Errors
///
/// Will return an error if the action fails
pub async fn handle<S: ObjectStore>(
    store: &S,
    action: Action,
    globals: &GlobalArgs,
) -> Result<Summary, Error> {
    let Action::PutDirectory {
        dir,
        acl,
        compression,
        sync,
    } = action;

    let options = UploadOptions {
        root: dir,
        compression,
        acl,
    };

    let uploaded = upload_dir(store, &options, globals).await?;

    log::info!(
        "{} objects uploaded to {}",
        uploaded.len(),
        store.bucket()
    );

    // sync only starts once every upload succeeded
    let deleted = if sync {
        Some(sync_bucket(store, &uploaded, globals).await?)
    } else {
        None
    };

    Ok(Summary {
        uploaded: uploaded.len(),
        deleted,
    })
}

use crate::{
    cli::globals::GlobalArgs,
    error::Error,
    store::ObjectStore,
    stream::{UploadedKeySet, await_remaining_tasks, await_tasks, retry},
};
use futures::stream::FuturesUnordered;

async fn delete_orphan<S: ObjectStore>(
    store: &S,
    key: &str,
    globals: &GlobalArgs,
) -> Result<(), Error> {
    if !globals.quiet {
        println!("removing {key} from {}", store.bucket());
    }

    retry(globals.retries, &format!("delete {key}"), move || {
        store.delete_object(key)
    })
    .await
    .map_err(|cause| Error::Delete {
        key: key.to_string(),
        cause,
    })?;

    log::info!("deleted {}/{key}", store.bucket());

    Ok(())
}

/// Delete every object of the bucket that is not in `uploaded`, returns how many were deleted
///
/// # Errors
///
/// Will return `Err` if a listing page or a delete fails, deletes already done are kept
pub async fn sync_bucket<S: ObjectStore>(
    store: &S,
    uploaded: &UploadedKeySet,
    globals: &GlobalArgs,
) -> Result<usize, Error> {
    println!("syncing...");

    let mut continuation_token: Option<String> = None;
    let mut deleted: usize = 0;

    loop {
        let token = continuation_token.as_deref();
        let page = retry(globals.retries, "list objects", move || {
            store.list_objects(token)
        })
        .await
        .map_err(Error::List)?;

        log::debug!(
            "page with {} objects, next token: {:?}",
            page.objects.len(),
            page.next_continuation_token
        );

        let orphans: Vec<String> = page
            .objects
            .into_iter()
            .map(|object| object.key)
            .filter(|key| !uploaded.contains(key))
            .collect();

        let mut tasks = FuturesUnordered::new();

        for key in &orphans {
            tasks.push(delete_orphan(store, key, globals));

            await_tasks(&mut tasks, globals.number, |()| deleted += 1).await?;
        }

        await_remaining_tasks(&mut tasks, |()| deleted += 1).await?;

        match page.next_continuation_token {
            Some(token) => continuation_token = Some(token),
            None => break,
        }
    }

    println!("syncing has finished: {deleted} objects were deleted.");

    Ok(deleted)
}

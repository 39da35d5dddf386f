pub mod compression;
pub mod sync;
pub mod upload_dir;

use crate::error::Error;
use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::{collections::BTreeSet, future::Future};
use tokio::time::{Duration, sleep};

/// Keys uploaded during the current run
pub type UploadedKeySet = BTreeSet<String>;

/// Call `f` up to `retries` times, waiting `2^(attempt - 1)` seconds between attempts
///
/// # Errors
///
/// Returns the error of the last attempt
pub async fn retry<T, F, Fut>(retries: u32, what: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let retries = retries.max(1);

    let mut attempt = 1;
    loop {
        match f().await {
            Ok(value) => return Ok(value),

            Err(e) if attempt < retries => {
                let backoff_time = 2u64.saturating_pow(attempt - 1);

                log::warn!(
                    "{what}, attempt {attempt}/{retries} failed: {e:#}, retrying in {backoff_time} seconds"
                );

                sleep(Duration::from_secs(backoff_time)).await;

                attempt += 1;
            }

            Err(e) => return Err(e),
        }
    }
}

// throttling tasks
async fn await_tasks<T, O>(
    tasks: &mut FuturesUnordered<T>,
    max_requests: usize,
    mut done: impl FnMut(O),
) -> Result<(), Error>
where
    T: Future<Output = Result<O, Error>>,
{
    log::debug!("Running tasks: {}", tasks.len());

    while tasks.len() >= max_requests.max(1) {
        if let Some(r) = tasks.next().await {
            done(r?);
        }
    }

    Ok(())
}

// consume remaining tasks
async fn await_remaining_tasks<T, O>(
    tasks: &mut FuturesUnordered<T>,
    mut done: impl FnMut(O),
) -> Result<(), Error>
where
    T: Future<Output = Result<O, Error>>,
{
    log::debug!("Remaining tasks: {}", tasks.len());

    while let Some(r) = tasks.next().await {
        done(r?);
    }

    Ok(())
}

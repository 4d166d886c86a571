//! Concurrent batch download core.
//!
//! One batch run fans a fixed, deterministically built list of target URLs
//! out as one tokio task per URL, waits on the full set, and accumulates
//! response bodies in a shared [`ResultSet`].
//!
//! # Pipeline
//!
//! 1. [`targets`] derives the URL list from a [`FetchConfig`]
//!    (`base_url/1` .. `base_url/N`).
//! 2. [`build_client`] constructs the single shared HTTP client.
//! 3. [`spawn_batch`] schedules every fetch before any is awaited.
//! 4. [`join_batch`] is the barrier: first failure aborts the wait and
//!    propagates. [`join_settled`] is the collect-everything alternative.
//!
//! # Usage
//!
//! ```ignore
//! use batchdl_fetcher::FetchConfig;
//!
//! let count = batchdl_fetcher::run(&FetchConfig::default()).await?;
//! println!("Cache size: {count}");
//! ```
//!
//! # Error Handling
//!
//! All failures are [`FetchError`]. There is no retry and no per-task
//! recovery on the [`join_batch`] path; a single failed fetch fails the run.

mod cache;
mod client;
mod types;

use std::sync::Arc;

use reqwest::Client;
use tokio::task::JoinSet;
use url::Url;

pub use cache::ResultSet;
pub use client::{build_client, fetch_one};
pub use types::{BatchReport, FetchConfig, FetchError};

/// Build the deterministic target list: `base_url/{index}` for index
/// 1..=`post_count`.
///
/// The list is immutable once built; a count of zero yields an empty list
/// (and a batch that joins immediately).
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if the base template does not form a
/// parseable URL.
pub fn targets(config: &FetchConfig) -> Result<Vec<Url>, FetchError> {
    let base = config.base_url().trim_end_matches('/');
    (1..=config.post_count())
        .map(|index| Url::parse(&format!("{base}/{index}")).map_err(FetchError::from))
        .collect()
}

/// Spawn one fetch task per target URL.
///
/// Every task is scheduled (and running) before this returns; the returned
/// [`JoinSet`] is the barrier handle. Concurrency is bounded only by the
/// runtime and the client's connection pool. Each task fetches its URL and
/// appends the body to `results`.
#[must_use]
pub fn spawn_batch(
    client: &Client,
    urls: &[Url],
    results: &Arc<ResultSet>,
) -> JoinSet<Result<(), FetchError>> {
    let mut tasks = JoinSet::new();
    for url in urls {
        let client = client.clone();
        let url = url.clone();
        let results = Arc::clone(results);
        tasks.spawn(async move {
            let body = client::fetch_one(&client, &url).await?;
            results.push(body);
            Ok(())
        });
    }
    tasks
}

/// Wait for every task in the batch; the first observed failure aborts the
/// remaining wait and propagates.
///
/// Dropping the set on the error path cancels still-running tasks.
///
/// # Errors
///
/// Returns the first [`FetchError`] observed, including [`FetchError::Join`]
/// if a task panicked.
pub async fn join_batch(mut tasks: JoinSet<Result<(), FetchError>>) -> Result<(), FetchError> {
    while let Some(joined) = tasks.join_next().await {
        joined??;
    }
    Ok(())
}

/// Drive every task to a terminal state and tally the outcomes.
///
/// Unlike [`join_batch`], a failure never abandons in-flight work: the
/// remaining tasks still run to completion and successful bodies stay in the
/// result set.
pub async fn join_settled(mut tasks: JoinSet<Result<(), FetchError>>) -> BatchReport {
    let mut report = BatchReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => report.succeeded += 1,
            Ok(Err(error)) => {
                tracing::warn!(%error, "fetch failed");
                report.failed += 1;
                report.errors.push(error);
            }
            Err(join_error) => {
                tracing::warn!(%join_error, "fetch task did not complete");
                report.failed += 1;
                report.errors.push(FetchError::Join(join_error));
            }
        }
    }
    report
}

/// Run one full batch and return the final size of the result collection.
///
/// Builds the client and target list, spawns all fetches, joins, and reports
/// how many bodies were collected. The collection is created fresh per call;
/// nothing persists between runs.
///
/// # Errors
///
/// Propagates the first [`FetchError`] from setup or from any fetch task.
pub async fn run(config: &FetchConfig) -> Result<usize, FetchError> {
    let client = client::build_client(config)?;
    let urls = targets(config)?;
    let results = Arc::new(ResultSet::new());

    let tasks = spawn_batch(&client, &urls, &results);
    tracing::info!(targets = urls.len(), "batch started");

    join_batch(tasks).await?;

    tracing::info!(collected = results.len(), "batch finished");
    Ok(results.len())
}

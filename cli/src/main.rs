//! batchdl - Binary entry point.
//!
//! Downloads a fixed batch of posts concurrently and reports how many bodies
//! were collected. There are no flags and no configuration sources; the
//! argument vector is accepted and ignored.
//!
//! The three report lines go to stdout. Diagnostics go to stderr through
//! `tracing` (filterable with `RUST_LOG`), so the report stays clean. Any
//! fetch failure propagates out of `main`: the finished/size lines are never
//! printed and the process exits non-zero with the error on stderr.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use batchdl_fetcher::{FetchConfig, ResultSet, build_client, join_batch, spawn_batch, targets};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::try_new("error").expect("error filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = FetchConfig::default();
    let client = build_client(&config)?;
    let urls = targets(&config)?;

    let cache = Arc::new(ResultSet::new());
    let batch = spawn_batch(&client, &urls, &cache);
    tracing::debug!(targets = urls.len(), "batch scheduled");

    println!("Downloads started");

    join_batch(batch).await?;

    println!("Downloads finished");
    println!("Cache size: {}", cache.len());

    Ok(())
}

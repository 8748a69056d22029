//! Harvest coordinator
//!
//! Runs every configured account to a terminal state and funnels the
//! extracted image records into the corpus. Accounts are independent, so
//! they run on a bounded worker pool; pagination within an account stays
//! strictly sequential because each page's cursor comes from the previous
//! page. The corpus has a single writer: workers send records over a channel
//! to one collector task.

use crate::accounts::AccountList;
use crate::config::HarvestConfig;
use crate::corpus::{extract_records, Corpus, ImageRecord};
use crate::crawler::fetcher::{build_http_client, PageFetcher};
use crate::crawler::walker::{AccountWalker, WalkEnd};
use crate::HarvestError;
use chrono::Utc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Harvests all accounts and returns the finalized, ordered corpus
///
/// Per-account fetch/parse failures are logged and skipped; partial results
/// (including after cancellation) are valid output. Only client construction
/// fails the run here.
pub async fn run_harvest(
    config: &HarvestConfig,
    accounts: Arc<AccountList>,
    cancel: Arc<AtomicBool>,
) -> Result<Vec<ImageRecord>, HarvestError> {
    let client = build_http_client(config.request_timeout)?;
    let fetcher = Arc::new(PageFetcher::new(
        client,
        config.base_url.clone(),
        config.page_delay,
    ));
    let cutoff = config.cutoff(Utc::now());
    tracing::info!(
        "harvesting {} accounts, cutoff {}",
        accounts.len(),
        cutoff.format("%Y-%m-%d %H:%M:%S")
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<ImageRecord>();
    let collector = tokio::spawn(async move {
        let mut corpus = Corpus::new();
        while let Some(record) = rx.recv().await {
            if !corpus.insert(record) {
                tracing::debug!("duplicate image absorbed");
            }
        }
        corpus
    });

    let semaphore = Arc::new(Semaphore::new(config.jobs.max(1)));
    let mut walks = JoinSet::new();
    for handle in accounts.handles() {
        let handle = handle.clone();
        let fetcher = Arc::clone(&fetcher);
        let accounts = Arc::clone(&accounts);
        let cancel = Arc::clone(&cancel);
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();

        walks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (handle, WalkEnd::Cancelled, 0, 0),
            };

            let walker = AccountWalker::new(&fetcher, cutoff, &cancel);
            let outcome = walker.walk(&handle).await;

            let mut images = 0usize;
            for post in &outcome.kept {
                for record in extract_records(post, &accounts) {
                    images += 1;
                    // The collector outlives every worker; a send failure
                    // can only mean the run is being torn down
                    let _ = tx.send(record);
                }
            }
            (handle, outcome.end, outcome.pages, images)
        });
    }
    drop(tx);

    while let Some(joined) = walks.join_next().await {
        match joined {
            Ok((handle, end, pages, images)) => match end {
                WalkEnd::Stopped => {
                    tracing::info!("{}: reached cutoff after {} pages, {} images", handle, pages, images);
                }
                WalkEnd::Exhausted => {
                    tracing::info!("{}: timeline exhausted after {} pages, {} images", handle, pages, images);
                }
                WalkEnd::Cancelled => {
                    tracing::info!("{}: cancelled after {} pages, {} images kept", handle, pages, images);
                }
                WalkEnd::Failed(e) => {
                    tracing::error!("{}: crawl failed, account skipped: {}", handle, e);
                }
            },
            Err(e) => {
                tracing::error!("account walk task failed: {}", e);
            }
        }
    }

    let corpus = collector.await?;
    tracing::info!("{} unique images collected", corpus.len());
    Ok(corpus.finalize())
}

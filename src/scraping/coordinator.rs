//! Scrape coordinator
//!
//! Fans an identifier list out over the fetch/extract/upsert pipeline,
//! either sequentially with a fixed inter-request delay or through a
//! semaphore-bounded worker pool. Workers return per-identifier
//! outcomes; the coordinator folds them into a [`RunSummary`] with no
//! shared mutable counters.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::store::WellStore;
use crate::types::RunSummary;

use super::extractor::FieldExtractor;
use super::fetcher::WellFetcher;

/// How identifiers are scheduled.
#[derive(Debug, Clone, Copy)]
pub enum RunMode {
    /// One identifier at a time, in input order, with a fixed delay
    /// between requests to respect the upstream rate limit.
    Sequential { delay: Duration },
    /// Bounded worker pool with no inter-request delay; the fetcher's
    /// own backoff provides politeness. No ordering guarantee.
    Parallel { workers: usize },
}

/// Outcome for one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Inserted,
    Errored,
    Skipped,
}

/// Folded counters plus the identifiers that errored, so a caller can
/// re-queue them.
#[derive(Debug, Default)]
pub struct RunReport {
    pub summary: RunSummary,
    pub failed: Vec<String>,
}

impl RunReport {
    fn record(&mut self, api: &str, outcome: ProcessOutcome) {
        self.summary.record(outcome);
        if outcome == ProcessOutcome::Errored {
            self.failed.push(api.to_string());
        }
    }
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Inserted => self.inserted += 1,
            ProcessOutcome::Errored => self.errored += 1,
            ProcessOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Drives the fetch-extract-upsert pipeline over an identifier list.
pub struct ScrapeCoordinator {
    fetcher: WellFetcher,
    extractor: FieldExtractor,
    store: Arc<WellStore>,
}

impl ScrapeCoordinator {
    pub fn new(fetcher: WellFetcher, extractor: FieldExtractor, store: Arc<WellStore>) -> Self {
        Self {
            fetcher,
            extractor,
            store,
        }
    }

    /// Process every identifier and return the folded counters plus
    /// the identifiers that errored.
    ///
    /// The run always completes its input list; per-identifier failures
    /// are counted, logged, and never abort the run.
    pub async fn run(self: Arc<Self>, identifiers: Vec<String>, mode: RunMode) -> RunReport {
        match mode {
            RunMode::Sequential { delay } => self.run_sequential(identifiers, delay).await,
            RunMode::Parallel { workers } => self.run_parallel(identifiers, workers).await,
        }
    }

    /// Run the full list, then give everything that errored one more
    /// sequential pass. Transient upstream hiccups (rate-limit pages,
    /// dropped connections) often clear by the end of a long run, so a
    /// single quiet retry recovers identifiers the main pass lost.
    pub async fn run_with_retry(
        self: Arc<Self>,
        identifiers: Vec<String>,
        mode: RunMode,
    ) -> RunSummary {
        let report = Arc::clone(&self).run(identifiers, mode).await;
        let mut summary = report.summary;
        if report.failed.is_empty() {
            return summary;
        }

        info!(count = report.failed.len(), "retrying failed identifiers");
        let retry = self
            .run(
                report.failed,
                RunMode::Sequential {
                    delay: Duration::ZERO,
                },
            )
            .await;

        // Recovered identifiers move from errored to inserted; the
        // total stays equal to the input count.
        summary.inserted += retry.summary.inserted;
        summary.errored -= retry.summary.inserted;
        summary
    }

    async fn run_sequential(&self, identifiers: Vec<String>, delay: Duration) -> RunReport {
        info!(count = identifiers.len(), "starting sequential run");
        let total = identifiers.len();
        let mut report = RunReport::default();

        for (i, api) in identifiers.iter().enumerate() {
            let outcome = self.process(api).await;
            report.record(api, outcome);

            // Skipped identifiers never hit the network, so no delay owed.
            if outcome != ProcessOutcome::Skipped && i + 1 < total {
                tokio::time::sleep(delay).await;
            }
        }

        report
    }

    async fn run_parallel(self: Arc<Self>, identifiers: Vec<String>, workers: usize) -> RunReport {
        let workers = workers.max(1);
        info!(
            count = identifiers.len(),
            workers, "starting parallel run"
        );

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut handles = Vec::with_capacity(identifiers.len());

        for api in identifiers {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break; // Semaphore closed
            };
            let coordinator = Arc::clone(&self);
            let task_api = api.clone();
            handles.push((
                api,
                tokio::spawn(async move {
                    let _permit = permit; // Held until the task completes
                    coordinator.process(&task_api).await
                }),
            ));
        }

        let mut report = RunReport::default();
        for (api, handle) in handles {
            match handle.await {
                Ok(outcome) => report.record(&api, outcome),
                Err(e) => {
                    // A panicked worker still leaves its identifier
                    // eligible for a retry pass.
                    error!(%api, "worker task failed: {}", e);
                    report.record(&api, ProcessOutcome::Errored);
                }
            }
        }

        report
    }

    /// Fetch, extract, and upsert one identifier.
    ///
    /// Blank identifiers are skipped before the fetcher is invoked.
    /// Everything that can go wrong here turns into `Errored`.
    pub async fn process(&self, api: &str) -> ProcessOutcome {
        let api = api.trim();
        if api.is_empty() {
            warn!("skipping blank identifier");
            return ProcessOutcome::Skipped;
        }

        let body = match self.fetcher.fetch(api).await {
            Ok(body) => body,
            Err(e) => {
                error!(api, "fetch failed: {}", e);
                return ProcessOutcome::Errored;
            }
        };

        let record = self.extractor.extract(api, &body);
        if record.is_empty() {
            error!(api, "page yielded no data");
            return ProcessOutcome::Errored;
        }

        match self.store.upsert(&record) {
            Ok(()) => {
                info!(api, "inserted");
                ProcessOutcome::Inserted
            }
            Err(e) => {
                error!(api, "store upsert failed: {}", e);
                ProcessOutcome::Errored
            }
        }
    }
}

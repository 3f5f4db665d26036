// Bundle orchestrator: manifest in, persisted archive + progress out

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::archive::ArchiveBuilder;
use super::errors::BundleError;
use super::models::{AssetManifest, AssetSource, JobStage, JobState};
use super::progress::{
    compute_stage_percent, ProgressReporter, COMPRESS_STAGE_START, COMPRESS_STAGE_WEIGHT,
    FETCH_STAGE_START, FETCH_STAGE_WEIGHT,
};
use super::traits::{ArchiveSink, AssetFetcher};
use super::utils::{resolve_target_filename, truncate_message};

/// Drives one bundle job end to end: fetch every manifest asset in
/// order, fold them into the archive, compress, persist.
///
/// One job runs at a time per context; overlapping requests are
/// rejected up front with `JobAlreadyRunning`. Completion and failure
/// are communicated through the progress reporter, not return values.
#[derive(Clone)]
pub struct Bundler {
    fetcher: Arc<dyn AssetFetcher>,
    sink: Arc<dyn ArchiveSink>,
    reporter: Arc<ProgressReporter>,
    in_flight: Arc<AtomicBool>,
}

impl Bundler {
    pub fn new(
        fetcher: Arc<dyn AssetFetcher>,
        sink: Arc<dyn ArchiveSink>,
        reporter: ProgressReporter,
    ) -> Self {
        Self {
            fetcher,
            sink,
            reporter: Arc::new(reporter),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Last emitted state, readable even after the job's context is gone.
    pub fn current_state(&self) -> JobState {
        self.reporter.store().current()
    }

    /// Run a job to completion on the current task.
    ///
    /// Returns `JobAlreadyRunning` without side effects when a job is
    /// in flight; any other outcome (including failure) is reported
    /// through emissions and the call returns `Ok`.
    pub async fn run_job(&self, manifest: AssetManifest) -> Result<(), BundleError> {
        self.acquire()?;
        self.execute(manifest).await;
        self.in_flight.store(false, Ordering::Release);
        Ok(())
    }

    /// Fire-and-forget variant: the caller may drop the handle and
    /// watch the state store instead.
    pub fn spawn_job(&self, manifest: AssetManifest) -> Result<JoinHandle<()>, BundleError> {
        self.acquire()?;
        let this = self.clone();
        Ok(tokio::spawn(async move {
            this.execute(manifest).await;
            this.in_flight.store(false, Ordering::Release);
        }))
    }

    fn acquire(&self) -> Result<(), BundleError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            eprintln!("[Bundler] Rejecting job: one is already in flight");
            return Err(BundleError::JobAlreadyRunning);
        }
        Ok(())
    }

    async fn execute(&self, manifest: AssetManifest) {
        eprintln!(
            "[Bundler] Starting job for \"{}\" ({} entries)",
            manifest.title,
            manifest.len()
        );
        if let Err(e) = self.run_pipeline(manifest).await {
            eprintln!("[Bundler] Job failed: {}", e);
            self.reporter
                .emit(JobState::failed(truncate_message(&e.to_string())));
        }
    }

    async fn run_pipeline(&self, manifest: AssetManifest) -> Result<(), BundleError> {
        // Gathering
        let total = manifest.len();
        if total == 0 {
            return Err(BundleError::EmptyManifest);
        }

        self.reporter.emit(JobState::in_progress(
            JobStage::Fetching,
            0,
            "Downloading files...".to_string(),
        ));

        // Fetching: strict manifest order, per-asset failures tolerated
        let mut builder = ArchiveBuilder::new();
        let mut failed = 0usize;

        for (i, entry) in manifest.entries.iter().enumerate() {
            let message = match &entry.source {
                AssetSource::Inline(text) => {
                    builder.add_text_entry(&entry.target_filename, text);
                    format!("Added {}", entry.target_filename)
                }
                AssetSource::Url(url) => match self.fetcher.fetch(url).await {
                    Ok(bytes) => {
                        let name = resolve_target_filename(
                            &entry.target_filename,
                            url,
                            entry.kind.default_extension(),
                        );
                        builder.add_entry(&name, bytes);
                        format!("Added {}", name)
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!("[Bundler] Skipping {}: {}", entry.target_filename, e);
                        format!("Failed to fetch {}", entry.target_filename)
                    }
                },
            };

            let fraction = (i + 1) as f64 / total as f64;
            self.reporter.emit(JobState::in_progress(
                JobStage::Fetching,
                compute_stage_percent(FETCH_STAGE_START, FETCH_STAGE_WEIGHT, fraction),
                format!("{} ({}/{})", message, i + 1, total),
            ));
        }

        // Compressing
        let reporter = Arc::clone(&self.reporter);
        let bytes = builder.serialize(move |fraction| {
            reporter.emit(JobState::in_progress(
                JobStage::Compressing,
                compute_stage_percent(COMPRESS_STAGE_START, COMPRESS_STAGE_WEIGHT, fraction),
                "Compressing archive...".to_string(),
            ));
        })?;

        // Finalizing: 99 goes out just before the sink is asked
        self.reporter.emit(JobState::in_progress(
            JobStage::Finalizing,
            99,
            "Saving archive...".to_string(),
        ));
        let saved_as = self.sink.save(&bytes, &manifest.archive_filename()).await?;
        eprintln!("[Bundler] ✓ Bundle saved as {}", saved_as);

        let message = if failed == 0 {
            "Backup complete!".to_string()
        } else {
            format!(
                "Backup complete: {} item{} failed",
                failed,
                if failed == 1 { "" } else { "s" }
            )
        };
        self.reporter.emit(JobState::complete(message));
        Ok(())
    }
}

//! Background scan orchestration.
//!
//! At most one scan is active per controller. The worker thread owns the
//! tree while it is being built and hands it back through its join handle,
//! so the caller never observes a partial tree.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use dirscope_analyze::finalize;
use dirscope_core::{ScanConfig, ScanError, ScanReport, ScanTree};

use crate::counter::count_entries;
use crate::progress::{ProgressSnapshot, ScanPhase, ScanProgress};
use crate::scanner::{TreeScanner, validate_root};

/// Outcome of a [`ScanController::poll`].
#[derive(Debug)]
pub enum ScanStatus {
    /// No scan was started, or its result was already collected.
    Idle,
    /// The worker is still running.
    Running(ProgressSnapshot),
    /// The scan finished and its report is ready.
    Completed(Box<ScanReport>),
    /// The scan failed.
    Failed(ScanError),
}

struct Worker {
    handle: JoinHandle<Result<ScanTree, ScanError>>,
    top_files: usize,
}

/// Runs scans on a named background thread and reports their progress.
pub struct ScanController {
    progress: Arc<ScanProgress>,
    worker: Option<Worker>,
}

impl ScanController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(ScanProgress::new()),
            worker: None,
        }
    }

    /// Shared progress counters of the current scan.
    pub fn progress(&self) -> Arc<ScanProgress> {
        Arc::clone(&self.progress)
    }

    /// Check whether a scan is active. A finished scan stays active until
    /// its result has been collected by [`poll`](Self::poll).
    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// Start scanning `config.root` in the background.
    ///
    /// The root is validated before anything is spawned. Fails with
    /// [`ScanError::ScanInProgress`] while another scan is active.
    pub fn start(&mut self, config: &ScanConfig) -> Result<(), ScanError> {
        if self.is_active() {
            return Err(ScanError::ScanInProgress);
        }
        let root = validate_root(&config.root)?;

        self.progress.reset();
        let progress = Arc::clone(&self.progress);
        let threads = config.threads;
        let count = config.count_entries;

        let handle = thread::Builder::new()
            .name("dirscope-scan".into())
            .spawn(move || run_scan(&root, threads, count, &progress))
            .map_err(|e| ScanError::Other {
                message: format!("Failed to spawn scan worker: {e}"),
            })?;

        self.worker = Some(Worker {
            handle,
            top_files: config.top_files,
        });
        Ok(())
    }

    /// Check on the current scan without blocking.
    ///
    /// Once the worker has terminated this joins it and finalizes the
    /// result exactly once; later polls return [`ScanStatus::Idle`].
    pub fn poll(&mut self) -> ScanStatus {
        match &self.worker {
            None => return ScanStatus::Idle,
            Some(worker) if !worker.handle.is_finished() => {
                return ScanStatus::Running(self.progress.snapshot());
            }
            Some(_) => {}
        }
        let Some(worker) = self.worker.take() else {
            return ScanStatus::Idle;
        };

        let status = match worker.handle.join() {
            Ok(Ok(tree)) => {
                self.progress.set_phase(ScanPhase::Finalizing);
                let report = finalize(tree, worker.top_files);
                info!(
                    entries = self.progress.current(),
                    top_files = report.top_files.len(),
                    "Scan report ready"
                );
                ScanStatus::Completed(Box::new(report))
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Scan failed");
                ScanStatus::Failed(err)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(%message, "Scan worker panicked");
                ScanStatus::Failed(ScanError::WorkerPanicked { message })
            }
        };
        self.progress.set_phase(ScanPhase::Done);
        status
    }

    /// Poll every `interval` until the scan ends, passing each live snapshot
    /// to `on_progress`.
    pub fn wait<F>(&mut self, interval: Duration, mut on_progress: F) -> Result<ScanReport, ScanError>
    where
        F: FnMut(&ProgressSnapshot),
    {
        loop {
            match self.poll() {
                ScanStatus::Running(snapshot) => {
                    on_progress(&snapshot);
                    thread::sleep(interval);
                }
                ScanStatus::Completed(report) => return Ok(*report),
                ScanStatus::Failed(err) => return Err(err),
                ScanStatus::Idle => {
                    return Err(ScanError::Other {
                        message: "No scan in progress".to_string(),
                    });
                }
            }
        }
    }
}

impl Default for ScanController {
    fn default() -> Self {
        Self::new()
    }
}

fn run_scan(
    root: &Path,
    threads: usize,
    count: bool,
    progress: &ScanProgress,
) -> Result<ScanTree, ScanError> {
    if count {
        progress.set_phase(ScanPhase::Counting);
        progress.set_total(count_entries(root, threads));
    }
    progress.set_phase(ScanPhase::Scanning);
    TreeScanner::new().scan(root, || progress.tick())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

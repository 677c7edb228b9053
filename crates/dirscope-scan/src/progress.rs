//! Scan progress reporting.
//!
//! The worker thread writes the counters, the controller reads them; all
//! fields are atomics so live reads never tear. Live values may lag, but a
//! read taken after the worker has been joined is exact.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Stage of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanPhase {
    /// No scan has run since the last reset.
    Idle = 0,
    /// Counting entries to size the progress denominator.
    Counting = 1,
    /// Walking the tree.
    Scanning = 2,
    /// Walk finished; derived views are being computed.
    Finalizing = 3,
    /// The scan has completed or failed.
    Done = 4,
}

impl ScanPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Counting,
            2 => Self::Scanning,
            3 => Self::Finalizing,
            4 => Self::Done,
            _ => Self::Idle,
        }
    }
}

/// Point-in-time copy of the progress counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Progress denominator (always at least 1).
    pub total: u64,
    /// Entries visited so far.
    pub current: u64,
    /// `min(100, current / total * 100)`.
    pub percent: f64,
    /// Current stage.
    pub phase: ScanPhase,
    /// Time since the scan started.
    pub elapsed: Duration,
}

/// Shared progress counters for the one in-flight scan.
#[derive(Debug)]
pub struct ScanProgress {
    total: AtomicU64,
    current: AtomicU64,
    phase: AtomicU8,
    started: Mutex<Instant>,
}

impl ScanProgress {
    /// Create idle counters.
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(1),
            current: AtomicU64::new(0),
            phase: AtomicU8::new(ScanPhase::Idle as u8),
            started: Mutex::new(Instant::now()),
        }
    }

    /// Zero the counters for a new scan.
    pub fn reset(&self) {
        self.total.store(1, Ordering::Relaxed);
        self.current.store(0, Ordering::Relaxed);
        self.set_phase(ScanPhase::Idle);
        if let Ok(mut started) = self.started.lock() {
            *started = Instant::now();
        }
    }

    /// Fix the denominator. Values below 1 are clamped.
    pub fn set_total(&self, total: u64) {
        self.total.store(total.max(1), Ordering::Relaxed);
    }

    /// Count one visited entry.
    pub fn tick(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
    }

    /// Move to another stage.
    pub fn set_phase(&self, phase: ScanPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    /// Entries visited so far.
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }

    /// Progress denominator.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Current stage.
    pub fn phase(&self) -> ScanPhase {
        ScanPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Copy the counters.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let total = self.total();
        let current = self.current();
        let elapsed = self
            .started
            .lock()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        ProgressSnapshot {
            total,
            current,
            percent: (current as f64 / total as f64 * 100.0).min(100.0),
            phase: self.phase(),
            elapsed,
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

//! Report sink abstraction
//!
//! Comparison outcomes, anomalies and written artifacts are emitted as
//! [`ReportEvent`]s to a pluggable [`ReportSink`]. The CLI logs them; tests
//! collect them in memory.

use crate::extractor::GeometricAnomaly;
use log::{info, warn};
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;

/// Which input of a comparison an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The layout under test
    Subject,
    /// The reference layout
    Reference,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject => f.write_str("subject"),
            Self::Reference => f.write_str("reference"),
        }
    }
}

/// Something worth reporting
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    /// A box comparison finished
    ComparisonCompleted {
        /// Content boxes matched
        content_box_match: bool,
        /// Border boxes matched
        border_box_match: bool,
        /// Largest per-field difference
        max_diff: f64,
        /// Tolerance applied
        tolerance: f64,
    },
    /// An input box carries a geometric anomaly
    AnomalyDetected {
        /// Input holding the anomaly
        side: Operand,
        /// The anomaly
        anomaly: GeometricAnomaly,
    },
    /// A document walk produced a snapshot
    SnapshotCaptured {
        /// Records emitted
        elements: usize,
        /// Elements excluded by tag
        skipped: usize,
    },
    /// An artifact was written to disk
    ArtifactWritten {
        /// Destination
        path: PathBuf,
    },
}

/// Destination for report events
pub trait ReportSink: Send + Sync {
    /// Record one event
    fn record(&self, event: ReportEvent);
}

/// Discards everything
pub struct NoOpSink;

impl ReportSink for NoOpSink {
    fn record(&self, _event: ReportEvent) {}
}

/// Forwards events to the `log` facade
pub struct LogSink;

impl ReportSink for LogSink {
    fn record(&self, event: ReportEvent) {
        match event {
            ReportEvent::ComparisonCompleted {
                content_box_match,
                border_box_match,
                max_diff,
                tolerance,
            } => info!(
                "comparison completed: content_box_match={} border_box_match={} max_diff={} tolerance={}",
                content_box_match, border_box_match, max_diff, tolerance
            ),
            ReportEvent::AnomalyDetected { side, anomaly } => {
                warn!("{} box: {}", side, anomaly)
            }
            ReportEvent::SnapshotCaptured { elements, skipped } => {
                info!("snapshot captured: {} elements, {} skipped", elements, skipped)
            }
            ReportEvent::ArtifactWritten { path } => info!("wrote {}", path.display()),
        }
    }
}

/// Keeps events in memory, for tests
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ReportSink for MemorySink {
    fn record(&self, event: ReportEvent) {
        self.events.lock().push(event);
    }
}

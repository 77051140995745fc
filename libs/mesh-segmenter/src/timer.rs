//! # Phase Timing
//!
//! The segmenter reports named phases to a [`PhaseTimer`] passed in by the
//! caller. It only starts and stops phases; interpreting the numbers is the
//! caller's business.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

const PHASE_COUNT: usize = 10;

/// Named phases of a segmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Total,
    Preprocessing,
    NormalComputation,
    MapCount,
    NormalMapInsertion,
    ConnectivityAndMeshGeneration,
    FaceGraphBuild,
    SegmentExtraction,
    TriangleMeshGeneration,
    SegmentColoring,
}

impl Phase {
    /// Every phase, in pipeline order.
    pub const ALL: [Phase; PHASE_COUNT] = [
        Phase::Total,
        Phase::Preprocessing,
        Phase::NormalComputation,
        Phase::MapCount,
        Phase::NormalMapInsertion,
        Phase::ConnectivityAndMeshGeneration,
        Phase::FaceGraphBuild,
        Phase::SegmentExtraction,
        Phase::TriangleMeshGeneration,
        Phase::SegmentColoring,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Total => "total",
            Phase::Preprocessing => "preprocessing",
            Phase::NormalComputation => "normal computation",
            Phase::MapCount => "map count",
            Phase::NormalMapInsertion => "normal map insertion",
            Phase::ConnectivityAndMeshGeneration => "connectivity checking and mesh generation",
            Phase::FaceGraphBuild => "face graph build",
            Phase::SegmentExtraction => "segment extraction",
            Phase::TriangleMeshGeneration => "triangle mesh generation",
            Phase::SegmentColoring => "segment coloring",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives phase boundaries from the segmenter.
pub trait PhaseTimer {
    fn start(&mut self, phase: Phase);
    fn stop(&mut self, phase: Phase);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimer;

impl PhaseTimer for NoopTimer {
    fn start(&mut self, _phase: Phase) {}
    fn stop(&mut self, _phase: Phase) {}
}

/// Accumulates wall-clock time per phase.
///
/// A phase may be started and stopped many times (for example once per
/// bucket); the durations add up. Stopping a phase that is not running is
/// ignored.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::timer::{Phase, PhaseStopwatch, PhaseTimer};
///
/// let mut stopwatch = PhaseStopwatch::new();
/// stopwatch.start(Phase::Total);
/// stopwatch.stop(Phase::Total);
/// assert_eq!(stopwatch.runs(Phase::Total), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhaseStopwatch {
    running: [Option<Instant>; PHASE_COUNT],
    elapsed: [Duration; PHASE_COUNT],
    runs: [u32; PHASE_COUNT],
}

impl PhaseStopwatch {
    /// Creates a stopwatch with all phases at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated time of a phase.
    pub fn elapsed(&self, phase: Phase) -> Duration {
        self.elapsed[phase.slot()]
    }

    /// How many times a phase was stopped.
    pub fn runs(&self, phase: Phase) -> u32 {
        self.runs[phase.slot()]
    }

    /// Whether a phase is currently running.
    pub fn is_running(&self, phase: Phase) -> bool {
        self.running[phase.slot()].is_some()
    }

    /// One line per phase that ran at least once.
    pub fn report(&self) -> String {
        Phase::ALL
            .iter()
            .filter(|phase| self.runs(**phase) > 0)
            .map(|phase| format!("{:<44}{:.3?}", phase.label(), self.elapsed(*phase)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PhaseTimer for PhaseStopwatch {
    fn start(&mut self, phase: Phase) {
        self.running[phase.slot()] = Some(Instant::now());
    }

    fn stop(&mut self, phase: Phase) {
        if let Some(started) = self.running[phase.slot()].take() {
            let elapsed = started.elapsed();
            self.elapsed[phase.slot()] += elapsed;
            self.runs[phase.slot()] += 1;
            debug!(phase = phase.label(), ?elapsed, "Phase finished");
        }
    }
}

//! Centralized configuration values shared across the segmentation pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// TOLERANCE CONSTANTS
// =============================================================================

/// Default angular tolerance (degrees) under which two face normals are
/// considered to point the same way.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TOLERANCE_DEGREES;
/// assert!(DEFAULT_TOLERANCE_DEGREES > 0.0);
/// ```
pub const DEFAULT_TOLERANCE_DEGREES: f64 = 5.0;

/// Largest meaningful angular tolerance. Any two directions are within
/// 180 degrees of each other.
///
/// # Examples
/// ```
/// use config::constants::MAX_TOLERANCE_DEGREES;
/// assert_eq!(MAX_TOLERANCE_DEGREES, 180.0);
/// ```
pub const MAX_TOLERANCE_DEGREES: f64 = 180.0;

/// Squared sine of the corner angle at or below which a triangle is treated
/// as degenerate (collinear, undefined normal).
///
/// Compared against `|(b-a)×(c-a)|² / (|b-a|²·|c-a|²)`, so the test does not
/// depend on the mesh's units.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_SINE_EPSILON;
/// assert!(DEGENERATE_SINE_EPSILON < 1.0e-6);
/// ```
pub const DEGENERATE_SINE_EPSILON: f64 = 1.0e-20;

// =============================================================================
// CONCURRENCY CONSTANTS
// =============================================================================

/// Upper bound on the number of lock stripes used by the sharded bucketing
/// strategy. The stripe count follows the bucket count up to this limit.
///
/// # Examples
/// ```
/// use config::constants::MAX_LOCK_STRIPES;
/// assert!(MAX_LOCK_STRIPES.is_power_of_two());
/// ```
pub const MAX_LOCK_STRIPES: usize = 1 << 16;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Diffuse color given to a freshly materialized segment before coloring.
pub const PLACEHOLDER_DIFFUSE: [f32; 3] = [1.0, 0.0, 0.0];

/// Ambient color applied to every colored segment.
pub const SEGMENT_AMBIENT: [f32; 3] = [1.0, 1.0, 1.0];

/// Specular color applied to every colored segment.
pub const SEGMENT_SPECULAR: [f32; 3] = [0.5, 0.5, 0.5];

/// Infix joining the source mesh name and the segment number.
///
/// # Examples
/// ```
/// use config::constants::SEGMENT_NAME_INFIX;
/// assert_eq!(format!("body{SEGMENT_NAME_INFIX}3"), "body_seg_3");
/// ```
pub const SEGMENT_NAME_INFIX: &str = "_seg_";

/// Prefix of the material name attached to each segment.
///
/// # Examples
/// ```
/// use config::constants::SEGMENT_MATERIAL_PREFIX;
/// assert_eq!(format!("{SEGMENT_MATERIAL_PREFIX}0"), "sub_materials_0");
/// ```
pub const SEGMENT_MATERIAL_PREFIX: &str = "sub_materials_";

// =============================================================================
// STRATEGY ENUMS
// =============================================================================

/// How triangles are distributed into per-normal buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketingStrategy {
    /// Per-chunk partial buckets merged by a single thread. No locks.
    #[default]
    PartitionedMerge,
    /// Concurrent insertion into a lock-striped (sharded) map.
    Sharded,
}

/// Which face-graph implementation the driver builds per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphBackend {
    /// Host adjacency with host traversal.
    #[default]
    Host,
    /// Host adjacency sized for a future device-resident traversal.
    Device,
}

/// What to do with faces whose normal is undefined (zero area).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateFacePolicy {
    /// Drop the face before clustering and log a warning.
    #[default]
    Skip,
    /// Fail the whole segmentation.
    Reject,
}

// =============================================================================
// SEGMENTER CONFIG
// =============================================================================

/// Immutable snapshot of the settings a segmentation run uses.
///
/// # Examples
/// ```
/// use config::constants::{BucketingStrategy, SegmenterConfig};
/// let cfg = SegmenterConfig::new(10.0)
///     .unwrap()
///     .with_bucketing(BucketingStrategy::Sharded);
/// assert_eq!(cfg.bucketing, BucketingStrategy::Sharded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmenterConfig {
    /// Angular tolerance in degrees, `0 < tolerance <= 180`.
    pub tolerance_degrees: f64,
    /// Number of contiguous chunks the face list is split into for the
    /// parallel phases. Zero means one chunk per pool thread.
    pub workers: usize,
    /// Bucketing strategy for the normal-map insertion phase.
    pub bucketing: BucketingStrategy,
    /// Face-graph implementation used per bucket.
    pub graph_backend: GraphBackend,
    /// Handling of zero-area faces.
    pub degenerate_faces: DegenerateFacePolicy,
}

impl SegmenterConfig {
    /// Builds a configuration, rejecting tolerances outside `(0, 180]`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SegmenterConfig;
    /// assert!(SegmenterConfig::new(5.0).is_ok());
    /// assert!(SegmenterConfig::new(0.0).is_err());
    /// assert!(SegmenterConfig::new(f64::NAN).is_err());
    /// ```
    pub fn new(tolerance_degrees: f64) -> Result<Self, ConfigError> {
        validate_tolerance(tolerance_degrees)?;
        Ok(Self {
            tolerance_degrees,
            ..Self::default()
        })
    }

    /// Sets the chunk count for the parallel phases.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the bucketing strategy.
    pub fn with_bucketing(mut self, bucketing: BucketingStrategy) -> Self {
        self.bucketing = bucketing;
        self
    }

    /// Sets the face-graph backend.
    pub fn with_graph_backend(mut self, graph_backend: GraphBackend) -> Self {
        self.graph_backend = graph_backend;
        self
    }

    /// Sets the degenerate-face policy.
    pub fn with_degenerate_faces(mut self, policy: DegenerateFacePolicy) -> Self {
        self.degenerate_faces = policy;
        self
    }

    /// Re-checks the tolerance. Fields are public, so a config assembled by
    /// hand is validated again before use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tolerance(self.tolerance_degrees)
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            tolerance_degrees: DEFAULT_TOLERANCE_DEGREES,
            workers: 0,
            bucketing: BucketingStrategy::default(),
            graph_backend: GraphBackend::default(),
            degenerate_faces: DegenerateFacePolicy::default(),
        }
    }
}

fn validate_tolerance(tolerance: f64) -> Result<(), ConfigError> {
    if !tolerance.is_finite() || tolerance <= 0.0 || tolerance > MAX_TOLERANCE_DEGREES {
        return Err(ConfigError::InvalidTolerance(tolerance));
    }
    Ok(())
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is not in `(0, 180]` degrees.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be in (0, {MAX_TOLERANCE_DEGREES}] degrees: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

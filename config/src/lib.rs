//! # Config Crate
//!
//! Centralized configuration for the planar mesh segmentation pipeline.
//! All magic numbers and tunable parameters are defined here so the
//! segmenter crate never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{SegmenterConfig, DEFAULT_TOLERANCE_DEGREES};
//!
//! let cfg = SegmenterConfig::default();
//! assert_eq!(cfg.tolerance_degrees, DEFAULT_TOLERANCE_DEGREES);
//!
//! let strict = SegmenterConfig::new(1.0).expect("valid tolerance");
//! assert!(strict.tolerance_degrees < cfg.tolerance_degrees);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated**: Settings are checked once at construction
//! - **Dependency Free**: Pure data, shared by every crate in the workspace

pub mod constants;

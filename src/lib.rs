//! Career Projection - Aging-curve engine for projecting remaining career value
//!
//! This library provides:
//! - Age-indexed delta tables for hitters and pitchers (standard and flattened shapes)
//! - Linear interpolation of deltas across fractional ages
//! - Year-by-year career projection with optional discounting
//! - Roster loading and parallel batch projection for tabular player data

pub mod error;
pub mod curves;
pub mod projection;
pub mod roster;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use curves::{AgeDeltaTable, CurveSet, CurveShape, Role, FALLBACK_DELTA};
pub use projection::{AccumulationPolicy, ProjectionConfig, ProjectionEngine, ProjectionInput};

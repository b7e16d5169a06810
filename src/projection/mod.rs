//! Projection engine for single and batch career projections

mod config;
mod engine;
mod input;

pub use config::{AccumulationPolicy, ProjectionConfig};
pub use engine::{ProjectedYear, ProjectionEngine};
pub use input::ProjectionInput;

// ============================================================================
// Default Projection Parameters
// ============================================================================
// - Future value is discounted at 10% per year when discounting is enabled
// - Projection runs through age 45 inclusive (ages strictly below 46)

/// Default annual discount rate applied to future value (10%)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Default exclusive age ceiling for projection
pub const DEFAULT_CEILING_AGE: f64 = 46.0;

/// Highest accepted ceiling; table keys are u8, so older ages only see the fallback
pub const MAX_CEILING_AGE: f64 = 256.0;

/// Round a projected total to one decimal place for display
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

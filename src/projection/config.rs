//! Projection configuration

use super::{DEFAULT_CEILING_AGE, DEFAULT_DISCOUNT_RATE, MAX_CEILING_AGE};
use crate::curves::{CurveShape, Role};
use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How projected years with non-positive value are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationPolicy {
    /// Start from max(0, value); non-positive years add nothing but the
    /// projection keeps running to the ceiling
    #[default]
    AccumulateAlways,

    /// Start from the raw value (negative included); stop at the first
    /// non-positive year
    StopOnNonPositive,
}

impl FromStr for AccumulationPolicy {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "accumulate_always" | "always" => Ok(AccumulationPolicy::AccumulateAlways),
            "stop_on_non_positive" | "stop" => Ok(AccumulationPolicy::StopOnNonPositive),
            other => Err(ProjectionError::config(format!("unknown accumulation policy '{}'", other))),
        }
    }
}

/// Parameters for a batch of projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Hitter or pitcher curve family
    #[serde(default = "default_role")]
    pub role: Role,

    /// Standard or flattened curve
    #[serde(default = "default_curve_shape")]
    pub curve_shape: CurveShape,

    /// Discount future years at `discount_rate`
    #[serde(default)]
    pub discount: bool,

    /// Annual discount rate (0.10 = 10%), used only when `discount` is set
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Projection covers ages strictly below this
    #[serde(default = "default_ceiling_age")]
    pub ceiling_age: f64,

    #[serde(default)]
    pub policy: AccumulationPolicy,
}

fn default_role() -> Role { Role::Hitter }
fn default_curve_shape() -> CurveShape { CurveShape::Standard }
fn default_discount_rate() -> f64 { DEFAULT_DISCOUNT_RATE }
fn default_ceiling_age() -> f64 { DEFAULT_CEILING_AGE }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new(Role::Hitter, CurveShape::Standard)
    }
}

impl ProjectionConfig {
    /// Undiscounted config with default ceiling and policy
    pub fn new(role: Role, curve_shape: CurveShape) -> Self {
        Self {
            role,
            curve_shape,
            discount: false,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            ceiling_age: DEFAULT_CEILING_AGE,
            policy: AccumulationPolicy::default(),
        }
    }

    /// Enable discounting at the given annual rate
    pub fn with_discount(mut self, rate: f64) -> Self {
        self.discount = true;
        self.discount_rate = rate;
        self
    }

    pub fn with_policy(mut self, policy: AccumulationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_ceiling_age(mut self, ceiling_age: f64) -> Self {
        self.ceiling_age = ceiling_age;
        self
    }

    /// Parse a JSON config; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ProjectionError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ProjectionError::config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric parameters are usable
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.discount_rate.is_finite() || self.discount_rate < 0.0 {
            return Err(ProjectionError::config(format!(
                "discount rate must be a non-negative number, got {}",
                self.discount_rate
            )));
        }
        if !self.ceiling_age.is_finite() || self.ceiling_age <= 0.0 {
            return Err(ProjectionError::config(format!(
                "ceiling age must be a positive number, got {}",
                self.ceiling_age
            )));
        }
        if self.ceiling_age > MAX_CEILING_AGE {
            return Err(ProjectionError::config(format!(
                "ceiling age must be at most {}, got {}",
                MAX_CEILING_AGE, self.ceiling_age
            )));
        }
        Ok(())
    }
}

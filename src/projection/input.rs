//! A single player-season observation

use crate::error::ProjectionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days per year used when converting a birth date to a fractional age
const DAYS_PER_YEAR: f64 = 365.25;

/// Starting point of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Age in (fractional) years
    pub age: f64,
    /// Current-season value (e.g. WAR)
    pub current_value: f64,
}

impl ProjectionInput {
    /// Create a validated input
    pub fn new(age: f64, current_value: f64) -> Result<Self, ProjectionError> {
        let input = Self { age, current_value };
        input.validate()?;
        Ok(input)
    }

    /// Create an input with age measured from a birth date
    ///
    /// Age is the elapsed days divided by 365.25, rounded to one decimal.
    pub fn from_birth_date(
        birth_date: NaiveDate,
        as_of: NaiveDate,
        current_value: f64,
    ) -> Result<Self, ProjectionError> {
        Self::new(age_on(birth_date, as_of)?, current_value)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.age.is_finite() {
            return Err(ProjectionError::input("age", format!("{} is not a finite number", self.age)));
        }
        if self.age < 0.0 {
            return Err(ProjectionError::input("age", format!("{} is negative", self.age)));
        }
        if !self.current_value.is_finite() {
            return Err(ProjectionError::input(
                "value",
                format!("{} is not a finite number", self.current_value),
            ));
        }
        Ok(())
    }
}

/// Fractional age on `as_of`, rounded to one decimal
pub(crate) fn age_on(birth_date: NaiveDate, as_of: NaiveDate) -> Result<f64, ProjectionError> {
    let days = (as_of - birth_date).num_days();
    if days < 0 {
        return Err(ProjectionError::input(
            "birth_date",
            format!("{} is after {}", birth_date, as_of),
        ));
    }
    let age = days as f64 / DAYS_PER_YEAR;
    Ok((age * 10.0).round() / 10.0)
}

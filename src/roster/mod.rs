//! Player roster rows and batch projection over them

pub mod loader;
pub mod writer;

pub use loader::{load_roster, load_roster_from_reader, ColumnMap};
pub use writer::{write_projected_csv, write_projected_json};

use crate::error::ProjectionError;
use crate::projection::{ProjectionEngine, ProjectionInput};
use chrono::NaiveDate;
use rayon::prelude::*;

/// Output column name for the standard curve, as the draft board labels it
pub const STANDARD_COLUMN: &str = "ProjectedCareerWAR";

/// Output column name for the flattened curve
pub const FLAT_COLUMN: &str = "FlatProjectedCareerWAR";

/// One player row, with the projection cells kept raw
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    /// Every cell of the original record, in header order
    pub fields: Vec<String>,
    pub age: Option<String>,
    pub value: Option<String>,
    pub birth_date: Option<String>,
}

/// A loaded roster: original headers plus rows
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub headers: Vec<String>,
    pub rows: Vec<RosterRow>,
}

/// A named output column produced by one engine
#[derive(Debug, Clone)]
pub struct ProjectionColumn {
    pub name: String,
    pub engine: ProjectionEngine,
}

impl ProjectionColumn {
    pub fn new(name: impl Into<String>, engine: ProjectionEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }
}

/// Per-row outcome: one total per column, or the reason the row was unusable
pub type RowProjection = Result<Vec<f64>, ProjectionError>;

impl RosterRow {
    /// Build the projection input for this row
    ///
    /// Uses the age cell when present; otherwise derives age from the birth
    /// date cell, which requires `as_of`.
    pub fn to_input(&self, as_of: Option<NaiveDate>) -> Result<ProjectionInput, ProjectionError> {
        let value = parse_number("value", self.value.as_deref())?;

        if let Some(age) = non_empty(self.age.as_deref()) {
            let age = parse_number("age", Some(age))?;
            return ProjectionInput::new(age, value);
        }

        match (non_empty(self.birth_date.as_deref()), as_of) {
            (Some(raw), Some(as_of)) => {
                let birth_date = raw
                    .parse::<NaiveDate>()
                    .map_err(|e| ProjectionError::input("birth_date", format!("'{}': {}", raw, e)))?;
                ProjectionInput::from_birth_date(birth_date, as_of, value)
            }
            (Some(_), None) => Err(ProjectionError::input(
                "age",
                "missing; birth date present but no as-of date given",
            )),
            (None, _) => Err(ProjectionError::input("age", "missing")),
        }
    }
}

impl Roster {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reference date for birth-date ages: the given date, or today's local date
pub fn as_of_or_today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Project every row against every column in parallel
///
/// Results are in row order. A malformed row yields its own error and never
/// affects another row.
pub fn project_roster(
    roster: &Roster,
    columns: &[ProjectionColumn],
    as_of: Option<NaiveDate>,
) -> Vec<RowProjection> {
    roster
        .rows
        .par_iter()
        .map(|row| -> RowProjection {
            let input = row.to_input(as_of)?;
            columns
                .iter()
                .map(|column| column.engine.project(&input))
                .collect()
        })
        .collect()
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(field: &'static str, cell: Option<&str>) -> Result<f64, ProjectionError> {
    let raw = non_empty(cell).ok_or_else(|| ProjectionError::input(field, "missing"))?;
    raw.parse::<f64>()
        .map_err(|_| ProjectionError::input(field, format!("'{}' is not a number", raw)))
}

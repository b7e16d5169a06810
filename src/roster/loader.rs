//! Roster CSV loading
//!
//! Cells are read as strings so a malformed age or value surfaces as a
//! per-row projection error instead of failing the whole file.

use super::{Roster, RosterRow};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header names of the columns the projection reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_age_column")]
    pub age: String,

    /// Current-season value, e.g. `WAR` or `ProjectedWAR`
    #[serde(default = "default_value_column")]
    pub value: String,

    /// Used when the age column is absent or blank (ISO `YYYY-MM-DD`)
    #[serde(default = "default_birth_date_column")]
    pub birth_date: String,
}

fn default_age_column() -> String { "Age".to_string() }
fn default_value_column() -> String { "WAR".to_string() }
fn default_birth_date_column() -> String { "BirthDate".to_string() }

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            age: default_age_column(),
            value: default_value_column(),
            birth_date: default_birth_date_column(),
        }
    }
}

/// Load a roster from a CSV file
pub fn load_roster<P: AsRef<Path>>(path: P, columns: &ColumnMap) -> Result<Roster, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = load_roster_from_reader(file, columns)?;
    log::info!("loaded {} rows from {}", roster.len(), path.display());
    Ok(roster)
}

/// Load a roster from any reader
///
/// The value column is required, as is at least one of the age and
/// birth date columns.
pub fn load_roster_from_reader<R: Read>(rdr: R, columns: &ColumnMap) -> Result<Roster, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let value_idx = find(&columns.value).ok_or_else(|| LoadError::MissingColumn(columns.value.clone()))?;
    let age_idx = find(&columns.age);
    let birth_idx = find(&columns.birth_date);
    if age_idx.is_none() && birth_idx.is_none() {
        return Err(LoadError::MissingColumn(columns.age.clone()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(String::from);
        rows.push(RosterRow {
            fields: record.iter().map(String::from).collect(),
            age: cell(age_idx),
            value: cell(Some(value_idx)),
            birth_date: cell(birth_idx),
        });
    }

    Ok(Roster { headers, rows })
}

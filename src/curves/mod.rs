//! Aging curves: delta tables keyed by role and curve shape

mod table;
pub mod loader;

pub use table::{AgeDeltaTable, FALLBACK_DELTA};
pub use loader::{load_curves, load_curves_from_reader};

use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Player role, selecting hitter or pitcher curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hitter,
    Pitcher,
}

/// Curve shape: full variance or dampened growth/decline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveShape {
    Standard,
    #[serde(alias = "flatten", alias = "flattened")]
    Flat,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Hitter, Role::Pitcher];
}

impl CurveShape {
    pub const ALL: [CurveShape; 2] = [CurveShape::Standard, CurveShape::Flat];
}

impl FromStr for Role {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hitter" | "hitters" | "batter" => Ok(Role::Hitter),
            "pitcher" | "pitchers" => Ok(Role::Pitcher),
            other => Err(ProjectionError::config(format!("unknown role '{}'", other))),
        }
    }
}

impl FromStr for CurveShape {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(CurveShape::Standard),
            "flat" | "flatten" | "flattened" => Ok(CurveShape::Flat),
            other => Err(ProjectionError::config(format!("unknown curve shape '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hitter => write!(f, "hitter"),
            Role::Pitcher => write!(f, "pitcher"),
        }
    }
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveShape::Standard => write!(f, "standard"),
            CurveShape::Flat => write!(f, "flat"),
        }
    }
}

/// The delta tables available to a projection engine
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    tables: HashMap<(Role, CurveShape), AgeDeltaTable>,
}

impl Default for CurveSet {
    fn default() -> Self {
        let mut tables = HashMap::with_capacity(4);
        tables.insert((Role::Hitter, CurveShape::Standard), AgeDeltaTable::hitter_standard());
        tables.insert((Role::Hitter, CurveShape::Flat), AgeDeltaTable::hitter_flat());
        tables.insert((Role::Pitcher, CurveShape::Standard), AgeDeltaTable::pitcher_standard());
        tables.insert((Role::Pitcher, CurveShape::Flat), AgeDeltaTable::pitcher_flat());
        Self { tables }
    }
}

impl CurveSet {
    /// A set with no tables; populate with [`CurveSet::insert`]
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn insert(&mut self, role: Role, shape: CurveShape, table: AgeDeltaTable) {
        self.tables.insert((role, shape), table);
    }

    pub fn get(&self, role: Role, shape: CurveShape) -> Option<&AgeDeltaTable> {
        self.tables.get(&(role, shape))
    }

    /// Table for a role/shape, or a configuration error when the set lacks it
    pub fn require(&self, role: Role, shape: CurveShape) -> Result<&AgeDeltaTable, ProjectionError> {
        self.get(role, shape).ok_or_else(|| {
            ProjectionError::config(format!("no {} curve for {}s", shape, role))
        })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

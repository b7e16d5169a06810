//! Load replacement delta tables from CSV
//!
//! Expected columns: `role,shape,age,delta`, one row per (curve, age).

use super::{AgeDeltaTable, CurveSet, CurveShape, Role};
use crate::error::LoadError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawDelta {
    role: String,
    shape: String,
    age: u8,
    delta: f64,
}

/// Load a curve set from a CSV file
pub fn load_curves<P: AsRef<Path>>(path: P) -> Result<CurveSet, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_curves_from_reader(file)
}

/// Load a curve set from any reader
/// Only the curves present in the data are included in the set
pub fn load_curves_from_reader<R: Read>(rdr: R) -> Result<CurveSet, LoadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut grouped: HashMap<(Role, CurveShape), Vec<(u8, f64)>> = HashMap::new();

    for (idx, result) in reader.deserialize::<RawDelta>().enumerate() {
        let raw = result?;
        // Header is line 1
        let row = idx + 2;
        let role: Role = raw.role.parse().map_err(|source| LoadError::Row { row, source })?;
        let shape: CurveShape = raw.shape.parse().map_err(|source| LoadError::Row { row, source })?;
        grouped.entry((role, shape)).or_default().push((raw.age, raw.delta));
    }

    let mut curves = CurveSet::empty();
    for ((role, shape), deltas) in grouped {
        log::debug!("loaded {} {} curve with {} ages", role, shape, deltas.len());
        curves.insert(role, shape, AgeDeltaTable::from_loaded(&deltas));
    }
    Ok(curves)
}

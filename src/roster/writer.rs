//! Write projected rosters as CSV or JSON

use super::{Roster, RowProjection};
use crate::error::LoadError;
use crate::projection::round_to_tenth;
use serde_json::{Map, Value};
use std::io::Write;

/// Write the original columns plus one column per projection
///
/// Totals are rounded to one decimal. Failed rows get empty projection
/// cells, or are dropped entirely when `skip_invalid` is set.
/// Returns the number of data rows written.
pub fn write_projected_csv<W: Write>(
    writer: W,
    roster: &Roster,
    column_names: &[&str],
    results: &[RowProjection],
    skip_invalid: bool,
) -> Result<usize, LoadError> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    let mut header: Vec<&str> = roster.headers.iter().map(String::as_str).collect();
    header.extend_from_slice(column_names);
    wtr.write_record(&header)?;

    let mut written = 0;
    for (row, result) in roster.rows.iter().zip(results) {
        let totals: Vec<String> = match result {
            Ok(totals) => totals.iter().map(|t| format!("{:.1}", round_to_tenth(*t))).collect(),
            Err(_) if skip_invalid => continue,
            Err(_) => vec![String::new(); column_names.len()],
        };

        let mut record: Vec<&str> = row.fields.iter().map(String::as_str).collect();
        // Pad short records so projections line up under their headers
        record.resize(roster.headers.len(), "");
        record.extend(totals.iter().map(String::as_str));
        wtr.write_record(&record)?;
        written += 1;
    }

    wtr.flush().map_err(|e| LoadError::Csv(e.into()))?;
    Ok(written)
}

/// Write an array of JSON objects, one per row
///
/// Failed rows carry `null` projections and an `error` message unless
/// `skip_invalid` drops them.
pub fn write_projected_json<W: Write>(
    writer: W,
    roster: &Roster,
    column_names: &[&str],
    results: &[RowProjection],
    skip_invalid: bool,
) -> Result<usize, LoadError> {
    let mut records = Vec::with_capacity(roster.len());

    for (row, result) in roster.rows.iter().zip(results) {
        if result.is_err() && skip_invalid {
            continue;
        }

        let mut object = Map::new();
        for (header, field) in roster.headers.iter().zip(&row.fields) {
            object.insert(header.clone(), Value::String(field.clone()));
        }
        match result {
            Ok(totals) => {
                for (name, total) in column_names.iter().zip(totals) {
                    object.insert(name.to_string(), Value::from(round_to_tenth(*total)));
                }
            }
            Err(err) => {
                for name in column_names {
                    object.insert(name.to_string(), Value::Null);
                }
                object.insert("error".to_string(), Value::String(err.to_string()));
            }
        }
        records.push(Value::Object(object));
    }

    let written = records.len();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(written)
}

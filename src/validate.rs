//! Row validation: raw decoded rows into typed equipment records.

use serde::{Deserialize, Serialize};

use crate::{
    error::IngestError,
    normalize::{COL_FLOWRATE, COL_PRESSURE, COL_TEMPERATURE, COL_TYPE},
};

/// One equipment row in the canonical schema. Numeric fields are always
/// finite once construction succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub equipment_type: String,
}

/// Positions of the required columns within a normalized header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnLayout {
    flowrate: usize,
    pressure: usize,
    temperature: usize,
    equipment_type: usize,
}

impl ColumnLayout {
    /// Locates the four required columns. Headers must already be normalized.
    /// Extra columns are ignored; a missing column is a schema failure.
    pub fn resolve(headers: &[String]) -> Result<Self, IngestError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| IngestError::Schema {
                    column: name.to_string(),
                })
        };
        // Lookups run in REQUIRED_COLUMNS order so the first missing column
        // in canonical order is the one reported.
        Ok(Self {
            flowrate: position(COL_FLOWRATE)?,
            pressure: position(COL_PRESSURE)?,
            temperature: position(COL_TEMPERATURE)?,
            equipment_type: position(COL_TYPE)?,
        })
    }
}

/// Validates rows in original order, fail-fast: the first malformed field
/// aborts the whole dataset. `rows` carries raw decoded fields, one `Vec`
/// per data row.
pub fn validate_rows(
    layout: &ColumnLayout,
    rows: &[Vec<String>],
) -> Result<Vec<EquipmentRecord>, IngestError> {
    if rows.is_empty() {
        return Err(IngestError::EmptyDataset);
    }
    rows.iter()
        .enumerate()
        .map(|(idx, row)| build_record(layout, idx + 1, row))
        .collect()
}

fn build_record(
    layout: &ColumnLayout,
    row_number: usize,
    row: &[String],
) -> Result<EquipmentRecord, IngestError> {
    Ok(EquipmentRecord {
        flowrate: parse_finite(row, layout.flowrate, COL_FLOWRATE, row_number)?,
        pressure: parse_finite(row, layout.pressure, COL_PRESSURE, row_number)?,
        temperature: parse_finite(row, layout.temperature, COL_TEMPERATURE, row_number)?,
        equipment_type: field(row, layout.equipment_type).trim().to_string(),
    })
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn parse_finite(
    row: &[String],
    index: usize,
    column: &str,
    row_number: usize,
) -> Result<f64, IngestError> {
    let raw = field(row, index).trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IngestError::Parse {
            row: row_number,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_layout_with_extra_columns() {
        let layout = ColumnLayout::resolve(&headers(&[
            "site",
            "temperature",
            "flowrate",
            "type",
            "pressure",
            "notes",
        ]))
        .expect("layout");
        let records = validate_rows(&layout, &[row(&["A", "300", "10", "pump", "5", "ok"])])
            .expect("records");
        assert_eq!(records[0].flowrate, 10.0);
        assert_eq!(records[0].pressure, 5.0);
        assert_eq!(records[0].temperature, 300.0);
        assert_eq!(records[0].equipment_type, "pump");
    }

    #[test]
    fn missing_column_is_schema_error() {
        let err = ColumnLayout::resolve(&headers(&["flowrate", "temperature", "type"]))
            .expect_err("schema error");
        assert!(matches!(err, IngestError::Schema { column } if column == "pressure"));
    }

    #[test]
    fn zero_rows_is_empty_dataset() {
        let layout =
            ColumnLayout::resolve(&headers(&["flowrate", "pressure", "temperature", "type"]))
                .expect("layout");
        let err = validate_rows(&layout, &[]).expect_err("empty");
        assert!(matches!(err, IngestError::EmptyDataset));
    }

    #[test]
    fn non_numeric_field_names_row_and_column() {
        let layout =
            ColumnLayout::resolve(&headers(&["flowrate", "pressure", "temperature", "type"]))
                .expect("layout");
        let rows = vec![
            row(&["10", "5", "300", "pump"]),
            row(&["abc", "7", "310", "valve"]),
        ];
        let err = validate_rows(&layout, &rows).expect_err("parse error");
        match err {
            IngestError::Parse { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "flowrate");
                assert_eq!(value, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_numeric_is_rejected() {
        let layout =
            ColumnLayout::resolve(&headers(&["flowrate", "pressure", "temperature", "type"]))
                .expect("layout");
        let err =
            validate_rows(&layout, &[row(&["inf", "5", "300", "pump"])]).expect_err("non-finite");
        assert!(matches!(err, IngestError::Parse { column, .. } if column == "flowrate"));
    }

    #[test]
    fn validation_stops_at_first_failure() {
        let layout =
            ColumnLayout::resolve(&headers(&["flowrate", "pressure", "temperature", "type"]))
                .expect("layout");
        let rows = vec![
            row(&["x", "5", "300", "pump"]),
            row(&["10", "y", "310", "valve"]),
        ];
        let err = validate_rows(&layout, &rows).expect_err("parse error");
        assert!(matches!(err, IngestError::Parse { row: 1, .. }));
    }
}

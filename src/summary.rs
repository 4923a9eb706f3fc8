//! Aggregation of validated equipment records into a dataset summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{error::IngestError, validate::EquipmentRecord};

/// Aggregate statistics for one ingested dataset. Immutable once built.
///
/// Averages are plain arithmetic means in `f64`; no rounding happens here.
/// Rounding for display is a presentation concern (see [`crate::render`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_equipment: usize,
    pub average_flowrate: f64,
    pub average_pressure: f64,
    pub average_temperature: f64,
    /// Occurrences of each distinct `type` label. Counts sum to
    /// `total_equipment`; iteration order is unspecified.
    pub type_distribution: HashMap<String, usize>,
}

/// Computes a [`Summary`] over a non-empty record set.
///
/// The validator already rejects empty datasets; the check here is a second
/// line of defense so an empty slice can never surface as a NaN average.
pub fn aggregate(records: &[EquipmentRecord]) -> Result<Summary, IngestError> {
    if records.is_empty() {
        return Err(IngestError::EmptyDataset);
    }

    let total = records.len();
    let mut flowrate_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut temperature_sum = 0.0;
    let mut type_distribution: HashMap<String, usize> = HashMap::new();

    for record in records {
        flowrate_sum += record.flowrate;
        pressure_sum += record.pressure;
        temperature_sum += record.temperature;
        *type_distribution
            .entry(record.equipment_type.clone())
            .or_insert(0) += 1;
    }

    Ok(Summary {
        total_equipment: total,
        average_flowrate: flowrate_sum / total as f64,
        average_pressure: pressure_sum / total as f64,
        average_temperature: temperature_sum / total as f64,
        type_distribution,
    })
}

//! Presentation formatting for summaries and history entries.
//!
//! Rounding lives here, not in the aggregator: averages are computed in full
//! precision and rendered to two decimals uniformly by every caller.

use crate::{history::HistoryEntry, summary::Summary};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

pub fn summary_headers() -> Vec<String> {
    ["metric", "value"].map(String::from).to_vec()
}

pub fn summary_rows(summary: &Summary) -> Vec<Vec<String>> {
    vec![
        vec![
            "total_equipment".to_string(),
            summary.total_equipment.to_string(),
        ],
        vec![
            "average_flowrate".to_string(),
            format_average(summary.average_flowrate),
        ],
        vec![
            "average_pressure".to_string(),
            format_average(summary.average_pressure),
        ],
        vec![
            "average_temperature".to_string(),
            format_average(summary.average_temperature),
        ],
    ]
}

pub fn distribution_headers() -> Vec<String> {
    ["type", "count", "percent"].map(String::from).to_vec()
}

/// Distribution rows ordered count-descending, then label-ascending. The
/// underlying map has no deterministic order; sorting here keeps terminal
/// output stable between runs.
pub fn distribution_rows(summary: &Summary) -> Vec<Vec<String>> {
    let total = summary.total_equipment.max(1);
    let mut items: Vec<_> = summary.type_distribution.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    items
        .into_iter()
        .map(|(label, count)| {
            let percent = (*count as f64 / total as f64) * 100.0;
            vec![label.clone(), count.to_string(), format!("{percent:.2}%")]
        })
        .collect()
}

pub fn history_headers() -> Vec<String> {
    [
        "filename",
        "uploaded_at",
        "total_equipment",
        "average_flowrate",
        "average_pressure",
        "average_temperature",
    ]
    .map(String::from)
    .to_vec()
}

pub fn history_rows(entries: &[HistoryEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            vec![
                entry.filename.clone(),
                entry.uploaded_at.format(TIMESTAMP_FORMAT).to_string(),
                entry.summary.total_equipment.to_string(),
                format_average(entry.summary.average_flowrate),
                format_average(entry.summary.average_pressure),
                format_average(entry.summary.average_temperature),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn summary() -> Summary {
        Summary {
            total_equipment: 4,
            average_flowrate: 15.0,
            average_pressure: 6.333333333,
            average_temperature: 305.555,
            type_distribution: HashMap::from([
                ("pump".to_string(), 2),
                ("valve".to_string(), 1),
                ("compressor".to_string(), 1),
            ]),
        }
    }

    #[test]
    fn averages_render_to_two_decimals() {
        let rows = summary_rows(&summary());
        assert_eq!(rows[1][1], "15.00");
        assert_eq!(rows[2][1], "6.33");
        assert_eq!(rows[3][1], "305.56");
    }

    #[test]
    fn distribution_sorted_by_count_then_label() {
        let rows = distribution_rows(&summary());
        let labels: Vec<_> = rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(labels, vec!["pump", "compressor", "valve"]);
        assert_eq!(rows[0][2], "50.00%");
    }

    #[test]
    fn history_row_formats_timestamp() {
        let entry = HistoryEntry {
            filename: "plant.csv".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2026, 8, 29, 9, 30, 5).unwrap(),
            summary: summary(),
        };
        let rows = history_rows(std::slice::from_ref(&entry));
        assert_eq!(rows[0][1], "2026-08-29 09:30:05");
        assert_eq!(rows[0][3], "15.00");
    }
}

//! Header normalization.
//!
//! Column headers are matched case- and whitespace-insensitively: `FlowRate`,
//! ` flowrate ` and `FLOWRATE` all address the same column. Normalization is
//! applied once, up front, so every later stage sees canonical labels.

/// The four columns every equipment dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_FLOWRATE, COL_PRESSURE, COL_TEMPERATURE, COL_TYPE];

pub const COL_FLOWRATE: &str = "flowrate";
pub const COL_PRESSURE: &str = "pressure";
pub const COL_TEMPERATURE: &str = "temperature";
pub const COL_TYPE: &str = "type";

/// Lower-cases and trims each header label. Pure; preserves count and order.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| normalize_header(h)).collect()
}

pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

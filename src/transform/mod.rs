// src/transform/mod.rs
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::{config::TableSchema, error::EtlError, table::GdpTable};

/// `1,234,567.89`, `1234.5`, `-12`; commas only in groups of three.
static THOUSANDS_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$")
        .expect("thousands-separated decimal pattern should compile")
});

/// Round the exact binary value of `x` to two decimals. Formatting rounds
/// the stored value itself, so `0.015` (stored just below) becomes `0.01`.
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}

/// `"26,854,599"` (million USD) → `26854.6` (billion USD).
pub fn millions_to_billions(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if !THOUSANDS_DECIMAL.is_match(raw) {
        return None;
    }
    let millions: f64 = raw.replace(',', "").parse().ok()?;
    Some(round2(millions / 1000.0))
}

/// Convert every raw GDP cell and relabel the column as `billions_column`.
///
/// One bad value fails the whole table. Applying this twice divides by
/// 1000 twice, so it runs exactly once per extracted table.
pub fn transform(
    table: GdpTable<String>,
    billions_column: &str,
) -> Result<GdpTable<f64>, EtlError> {
    let schema = TableSchema::new(table.schema.country, billions_column);
    let mut out = GdpTable::new(schema);
    out.rows.reserve(table.rows.len());

    for (row, record) in table.rows.into_iter().enumerate() {
        let billions =
            millions_to_billions(&record.gdp).ok_or_else(|| EtlError::MalformedInput {
                row,
                country: record.country.clone(),
                value: record.gdp.clone(),
            })?;
        out.push(record.country, billions);
    }

    info!(rows = out.len(), column = billions_column, "converted GDP to billions");
    Ok(out)
}

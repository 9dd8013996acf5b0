// src/load/csv.rs
use std::{fs::File, path::Path};

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::{error::EtlError, table::GdpTable};

#[derive(Serialize)]
struct CsvRow<'a> {
    index: usize,
    country: &'a str,
    gdp: f64,
}

/// Write `table` to `path`, truncating any previous file.
///
/// Layout follows a dataframe export: a leading unnamed index column
/// (0-based row position), then the table's own columns. An empty table
/// still gets the header line. Parent directories are not created.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.display()))]
pub fn write_csv(table: &GdpTable<f64>, path: &Path) -> Result<(), EtlError> {
    let csv_err = |source| EtlError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| EtlError::io(path, e))?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);

    let [country, gdp] = table.schema.columns();
    wtr.write_record(["", country, gdp]).map_err(csv_err)?;

    for (index, row) in table.rows.iter().enumerate() {
        wtr.serialize(CsvRow {
            index,
            country: &row.country,
            gdp: row.gdp,
        })
        .map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| EtlError::io(path, e))?;

    info!(rows = table.len(), "wrote CSV");
    Ok(())
}

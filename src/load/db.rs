// src/load/db.rs
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::info;

use crate::{config::quote_ident, error::EtlError, table::GdpTable};

/// Open (or create) the single-file store at `path`.
pub fn open_db(path: &Path) -> Result<Connection, EtlError> {
    Connection::open(path).map_err(|e| EtlError::db(format!("opening {}", path.display()), e))
}

/// Close explicitly so a failing close is reported rather than swallowed by `Drop`.
pub fn close_db(conn: Connection) -> Result<(), EtlError> {
    conn.close()
        .map_err(|(_, e)| EtlError::db("closing database", e))
}

/// Replace `table_name` with the contents of `table`.
///
/// Drop, create and insert run in one transaction: the old table is either
/// fully replaced or left untouched. The CSV index column is not stored.
#[tracing::instrument(level = "info", skip(conn, table))]
pub fn load_table(
    conn: &mut Connection,
    table: &GdpTable<f64>,
    table_name: &str,
) -> Result<(), EtlError> {
    let name = quote_ident(table_name);
    let [country, gdp] = table.schema.columns();

    let tx = conn
        .transaction()
        .map_err(|e| EtlError::db("beginning load transaction", e))?;

    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {name};
         CREATE TABLE {name} ({} TEXT, {} REAL);",
        quote_ident(country),
        quote_ident(gdp),
    ))
    .map_err(|e| EtlError::db(format!("creating table {table_name}"), e))?;

    {
        let mut insert = tx
            .prepare(&format!("INSERT INTO {name} VALUES (?1, ?2)"))
            .map_err(|e| EtlError::db("preparing insert", e))?;
        for row in &table.rows {
            insert
                .execute(params![row.country, row.gdp])
                .map_err(|e| EtlError::db(format!("inserting {}", row.country), e))?;
        }
    }

    tx.commit()
        .map_err(|e| EtlError::db("committing load transaction", e))?;

    info!(rows = table.len(), "loaded table");
    Ok(())
}

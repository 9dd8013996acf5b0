// src/query.rs
use std::fmt;

use rusqlite::{types::Value, Connection};
use tracing::info;

use crate::error::EtlError;

/// Column names plus rows, in the order the store returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run `sql` and collect every row. No ordering is added beyond what the
/// statement itself asks for.
#[tracing::instrument(level = "info", skip(conn))]
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryResult, EtlError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| EtlError::db("preparing query", e))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(|e| EtlError::db("running query", e))?;

    info!(rows = rows.len(), "query returned");
    Ok(QueryResult { columns, rows })
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{f:.2}"),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Console table: leading row index, every column right-aligned to its
/// widest cell.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "Empty result")?;
            return writeln!(f, "Columns: [{}]", self.columns.join(", "));
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(render_value).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {name:>w$}")?;
        }
        writeln!(f)?;

        for (idx, row) in cells.iter().enumerate() {
            write!(f, "{idx:<index_width$}")?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {cell:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

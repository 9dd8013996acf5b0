// src/pipeline.rs
use std::{io::Write, path::PathBuf};

use reqwest::Client;
use tracing::info;

use crate::{
    config::EtlConfig,
    error::EtlError,
    extract::extract_gdp_table,
    fetch::fetch_page,
    load::{close_db, load_table, open_db, write_csv},
    progress::ProgressLog,
    query::{run_query, QueryResult},
    transform::transform,
};

/// What one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub rows: usize,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub query: QueryResult,
}

/// Fetch → extract → transform → CSV → DB → query, strictly in that order.
///
/// Every stage is bracketed by a `log` entry. The query result goes to `out`
/// as soon as the query returns. The first error ends the run; whatever was
/// written before it stays on disk.
pub async fn run_etl(
    config: &EtlConfig,
    client: &Client,
    log: &dyn ProgressLog,
    out: &mut dyn Write,
) -> Result<RunReport, EtlError> {
    log.log_progress("Starting ETL from online source")?;

    log.log_progress("Starting Extraction")?;
    let html = fetch_page(client, &config.url).await?;
    let raw = extract_gdp_table(&html, &config.schema, &config.locator)?;
    log.log_progress("Extraction Ended")?;

    log.log_progress("Starting Transformation")?;
    let table = transform(raw, &config.billions_column)?;
    log.log_progress("Transformation Ended")?;

    log.log_progress("Starting Load to CSV")?;
    write_csv(&table, &config.csv_path)?;
    log.log_progress("Load to CSV Ended")?;

    let mut conn = open_db(&config.db_path)?;
    log.log_progress("Starting Load to DB")?;
    load_table(&mut conn, &table, &config.table_name)?;
    log.log_progress("Load to DB Ended")?;

    log.log_progress("Starting Query")?;
    let query = run_query(&conn, &config.query())?;
    write!(out, "{query}")
        .and_then(|()| out.flush())
        .map_err(EtlError::Output)?;
    close_db(conn)?;
    log.log_progress("Query Ended")?;

    log.log_progress("ETL process complete")?;
    info!(rows = table.len(), matched = query.len(), "run finished");

    Ok(RunReport {
        rows: table.len(),
        csv_path: config.csv_path.clone(),
        db_path: config.db_path.clone(),
        query,
    })
}

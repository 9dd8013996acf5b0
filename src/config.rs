// src/config.rs
use std::path::PathBuf;

use url::Url;

/// Archived snapshot of the Wikipedia "countries by nominal GDP" list.
pub const DEFAULT_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";

pub const DEFAULT_DB_PATH: &str = "World_Economies.db";
pub const DEFAULT_TABLE_NAME: &str = "Countries_by_GDP";
pub const DEFAULT_CSV_PATH: &str = "./Countries_by_GDP.csv";
pub const DEFAULT_LOG_PATH: &str = "./log_file.txt";

pub const COUNTRY_COLUMN: &str = "Country";
pub const GDP_MILLIONS_COLUMN: &str = "GDP_USD_millions";
pub const GDP_BILLIONS_COLUMN: &str = "GDP_USD_billions";

/// Ordered column names of the two-column GDP table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub country: String,
    pub gdp: String,
}

impl TableSchema {
    pub fn new(country: impl Into<String>, gdp: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            gdp: gdp.into(),
        }
    }

    pub fn columns(&self) -> [&str; 2] {
        [self.country.as_str(), self.gdp.as_str()]
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new(COUNTRY_COLUMN, GDP_MILLIONS_COLUMN)
    }
}

/// How the extractor picks the GDP table body out of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocator {
    /// N-th `<tbody>` in document order (0-based).
    Position(usize),
    /// First `<tbody>` whose table has a caption or header cell containing
    /// this text, compared case-insensitively.
    Anchor(String),
}

impl Default for TableLocator {
    fn default() -> Self {
        TableLocator::Position(2)
    }
}

/// Everything one run needs. `Default` reproduces the production run.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub url: Url,
    pub locator: TableLocator,
    pub schema: TableSchema,
    pub billions_column: String,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub min_gdp_billions: f64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default source URL should parse"),
            locator: TableLocator::default(),
            schema: TableSchema::default(),
            billions_column: GDP_BILLIONS_COLUMN.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            min_gdp_billions: 100.0,
        }
    }
}

impl EtlConfig {
    /// The filter query run after the load: every country at or above the
    /// threshold, inclusive.
    pub fn query(&self) -> String {
        format!(
            "SELECT * FROM {} WHERE {} >= {}",
            quote_ident(&self.table_name),
            quote_ident(&self.billions_column),
            self.min_gdp_billions
        )
    }
}

/// Double-quote an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

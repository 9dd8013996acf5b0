use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can fail. Nothing is recovered locally; the variant only
/// tells the operator which stage stopped the run.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Request, HTTP status or body read failed.
    #[error("fetching {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unsupported URL scheme `{scheme}` in {url}")]
    UnsupportedScheme { scheme: String, url: String },

    /// The page does not have the table structure the extractor expects.
    #[error("parse failure: {0}")]
    ParseFailure(String),

    /// A GDP cell that is not a thousands-separated decimal number.
    #[error("malformed GDP value {value:?} for {country:?} (row {row})")]
    MalformedInput {
        row: usize,
        country: String,
        value: String,
    },

    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing query result failed")]
    Output(#[source] std::io::Error),

    #[error("writing CSV {path:?} failed")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("database error while {action}")]
    Database {
        action: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl EtlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtlError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn db(action: impl Into<String>, source: rusqlite::Error) -> Self {
        EtlError::Database {
            action: action.into(),
            source,
        }
    }
}

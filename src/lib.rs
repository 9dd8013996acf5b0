pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod table;
pub mod transform;

pub use config::{EtlConfig, TableLocator, TableSchema};
pub use error::EtlError;
pub use pipeline::{run_etl, RunReport};
pub use progress::{FileProgressLog, MemoryProgressLog, ProgressLog};
pub use query::QueryResult;
pub use table::{GdpRow, GdpTable};

// src/load/mod.rs
pub mod csv;
pub mod db;

pub use self::csv::write_csv;
pub use self::db::{close_db, load_table, open_db};

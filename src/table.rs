// src/table.rs
use crate::config::TableSchema;

/// One country's figure. `T` is the raw cell text before the transform and
/// the billion-USD value after it.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRow<T> {
    pub country: String,
    pub gdp: T,
}

/// Ordered GDP records sharing one column schema. Row order is source order.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpTable<T> {
    pub schema: TableSchema,
    pub rows: Vec<GdpRow<T>>,
}

impl<T> GdpTable<T> {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, country: impl Into<String>, gdp: T) {
        self.rows.push(GdpRow {
            country: country.into(),
            gdp,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//! Table summary aggregate.

use serde::{Deserialize, Serialize};

use super::ColumnDescriptor;
use crate::error::Result;

/// Aggregate introspection result for one table.
///
/// Built fresh per [`crate::db::Database::summarize`] invocation and
/// immutable once returned. `non_null_counts` follows descriptor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Name of the summarized table
    pub table: String,
    /// Total number of rows
    pub row_count: u64,
    /// Column metadata in the engine's reported order
    pub columns: Vec<ColumnDescriptor>,
    /// Per-column non-null row counts, keyed by column name
    pub non_null_counts: Vec<(String, u64)>,
}

impl TableSummary {
    /// Looks up the non-null count for a column by name.
    pub fn non_null_count(&self, column: &str) -> Option<u64> {
        self.non_null_counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    /// Serializes the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

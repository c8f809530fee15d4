//! Column metadata reported by the engine.

use serde::{Deserialize, Serialize};

/// One row of `PRAGMA table_info`, in the engine's reported order.
///
/// Read-only; valid for the lifetime of one introspection call. A table
/// altered between calls yields fresh descriptors, never mutated ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Ordinal position within the table (0-based, engine-assigned)
    pub ordinal: u32,
    /// Column name
    pub name: String,
    /// Declared type, if the column was declared with one
    pub decl_type: Option<String>,
    /// Whether the column carries a NOT NULL constraint
    pub not_null: bool,
    /// Default value expression text, if any
    pub default_value: Option<String>,
    /// Whether the column is part of the primary key
    pub primary_key: bool,
}

//! Table introspection and summary reporting.

use log::debug;

use crate::error::{DatabaseResultExt, Result};
use crate::ident::Identifier;
use crate::models::{ColumnDescriptor, TableSummary};
use crate::statement::{self, TemplateKind};

impl super::Database {
    /// Returns the total row count of a table.
    ///
    /// Fails with `TableNotFound` when the engine reports the table missing.
    pub fn count_rows(&self, table: &Identifier) -> Result<u64> {
        let statement = statement::build(TemplateKind::CountRows, &[table.clone()], Vec::new())?;
        self.query_count(&statement)
    }

    /// Returns the number of non-null entries in a column.
    pub fn count_non_null(&self, table: &Identifier, column: &Identifier) -> Result<u64> {
        let statement = statement::build(
            TemplateKind::CountNonNull,
            &[table.clone(), column.clone()],
            Vec::new(),
        )?;
        self.query_count(&statement)
    }

    /// Returns the table's column metadata in the engine's reported order.
    ///
    /// A missing table yields no PRAGMA rows rather than an error, so
    /// existence is established by [`Self::count_rows`] before this is
    /// useful on its own.
    pub fn table_info(&self, table: &Identifier) -> Result<Vec<ColumnDescriptor>> {
        let statement =
            statement::build(TemplateKind::PragmaTableInfo, &[table.clone()], Vec::new())?;
        let mut prepared = self
            .connection
            .prepare(statement.sql())
            .classify("Failed to prepare table_info statement")?;
        let descriptors = prepared
            .query_map([], |row| {
                let decl_type: Option<String> = row.get(2)?;
                Ok(ColumnDescriptor {
                    ordinal: row.get::<_, i64>(0)? as u32,
                    name: row.get(1)?,
                    decl_type: decl_type.filter(|ty| !ty.is_empty()),
                    not_null: row.get::<_, i64>(3)? != 0,
                    default_value: row.get(4)?,
                    primary_key: row.get::<_, i64>(5)? > 0,
                })
            })
            .classify("Failed to query table_info")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .classify("Failed to read table_info rows")?;
        Ok(descriptors)
    }

    /// Builds the full summary for a table: row count, ordered column
    /// metadata, and per-column non-null counts.
    ///
    /// Read-only, no partial results: either the complete summary comes back
    /// or the failing step's error does. Cost is one statement per column on
    /// top of the two fixed ones, so wide tables and huge row counts make
    /// this proportionally slow.
    pub fn summarize(&self, table: &Identifier) -> Result<TableSummary> {
        let row_count = self.count_rows(table)?;
        let columns = self.table_info(table)?;
        let mut non_null_counts = Vec::with_capacity(columns.len());
        for column in &columns {
            let name = Identifier::new(column.name.clone())?;
            let count = self.count_non_null(table, &name)?;
            non_null_counts.push((column.name.clone(), count));
        }
        debug!(
            "summarized {}: {} rows, {} columns",
            table,
            row_count,
            columns.len()
        );
        Ok(TableSummary {
            table: table.as_str().to_string(),
            row_count,
            columns,
            non_null_counts,
        })
    }
}

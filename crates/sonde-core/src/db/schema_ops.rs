//! Schema operations: tables, columns, and indexes.

use crate::error::Result;
use crate::ident::Identifier;
use crate::statement::{self, ColumnSpec, TemplateKind};

impl super::Database {
    /// Creates a table from typed column definitions.
    pub fn create_table(&self, table: &Identifier, columns: &[ColumnSpec]) -> Result<()> {
        let statement = statement::build_create_table(table, columns)?;
        self.execute(&statement)?;
        Ok(())
    }

    /// Adds a column to an existing table.
    pub fn add_column(&self, table: &Identifier, column: &ColumnSpec) -> Result<()> {
        let statement = statement::build_add_column(table, column);
        self.execute(&statement)?;
        Ok(())
    }

    /// Creates an index over the given columns.
    pub fn create_index(
        &self,
        index: &Identifier,
        table: &Identifier,
        columns: &[Identifier],
    ) -> Result<()> {
        let mut identifiers = Vec::with_capacity(columns.len() + 2);
        identifiers.push(index.clone());
        identifiers.push(table.clone());
        identifiers.extend_from_slice(columns);
        let statement = statement::build(TemplateKind::CreateIndex, &identifiers, Vec::new())?;
        self.execute(&statement)?;
        Ok(())
    }

    /// Drops an index.
    pub fn drop_index(&self, index: &Identifier) -> Result<()> {
        let statement =
            statement::build(TemplateKind::DropIndex, &[index.clone()], Vec::new())?;
        self.execute(&statement)?;
        Ok(())
    }
}

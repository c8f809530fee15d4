//! Row operations: inserts, updates, and selects.

use jiff::Timestamp;

use crate::error::Result;
use crate::ident::Identifier;
use crate::statement::{self, TemplateKind, Value};

impl super::Database {
    /// Builds the `[table, columns..]` identifier sequence the templates use.
    fn table_and_columns(table: &Identifier, columns: &[Identifier]) -> Vec<Identifier> {
        let mut identifiers = Vec::with_capacity(columns.len() + 1);
        identifiers.push(table.clone());
        identifiers.extend_from_slice(columns);
        identifiers
    }

    /// Inserts a row, returning the new rowid.
    ///
    /// A primary-key or uniqueness conflict surfaces as
    /// `ConstraintViolation`; callers that want conflict-tolerant inserts
    /// use [`Self::insert_or_ignore`].
    pub fn insert(
        &self,
        table: &Identifier,
        columns: &[Identifier],
        values: Vec<Value>,
    ) -> Result<i64> {
        let identifiers = Self::table_and_columns(table, columns);
        let statement = statement::build(TemplateKind::Insert, &identifiers, values)?;
        self.execute(&statement)?;
        Ok(self.connection.last_insert_rowid())
    }

    /// Inserts a row unless it conflicts, returning whether a row was added.
    pub fn insert_or_ignore(
        &self,
        table: &Identifier,
        columns: &[Identifier],
        values: Vec<Value>,
    ) -> Result<bool> {
        let identifiers = Self::table_and_columns(table, columns);
        let statement = statement::build(TemplateKind::InsertOrIgnore, &identifiers, values)?;
        Ok(self.execute(&statement)? > 0)
    }

    /// Updates `set_columns` on every row where `predicate` equals the final
    /// bound value.
    ///
    /// `values` holds the new value for each set column, in order, followed
    /// by the predicate value. Returns the number of rows affected.
    pub fn update_where(
        &self,
        table: &Identifier,
        set_columns: &[Identifier],
        predicate: &Identifier,
        values: Vec<Value>,
    ) -> Result<usize> {
        let mut identifiers = Self::table_and_columns(table, set_columns);
        identifiers.push(predicate.clone());
        let statement = statement::build(TemplateKind::UpdateWhere, &identifiers, values)?;
        self.execute(&statement)
    }

    /// Returns every row of a table.
    pub fn select_all(&self, table: &Identifier) -> Result<Vec<Vec<Value>>> {
        let statement = statement::build(TemplateKind::SelectAll, &[table.clone()], Vec::new())?;
        self.query(&statement)
    }

    /// Returns the chosen columns of every row.
    pub fn select_columns(
        &self,
        table: &Identifier,
        columns: &[Identifier],
    ) -> Result<Vec<Vec<Value>>> {
        let identifiers = Self::table_and_columns(table, columns);
        let statement = statement::build(TemplateKind::SelectColumns, &identifiers, Vec::new())?;
        self.query(&statement)
    }

    /// Returns rows whose `column` timestamp is at or before `cutoff`.
    ///
    /// Timestamps are compared as RFC 3339 text, which orders correctly for
    /// UTC timestamps stored the same way. Callers derive age-based cutoffs
    /// with interval arithmetic, e.g.
    /// `Timestamp::now() - SignedDuration::from_hours(24)`.
    pub fn select_rows_before(
        &self,
        table: &Identifier,
        column: &Identifier,
        cutoff: Timestamp,
    ) -> Result<Vec<Vec<Value>>> {
        let statement = statement::build(
            TemplateKind::SelectBefore,
            &[table.clone(), column.clone()],
            vec![Value::Text(cutoff.to_string())],
        )?;
        self.query(&statement)
    }
}

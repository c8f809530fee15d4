//! Display implementations for introspection models.
//!
//! Formatting is kept out of the model definitions so the data structures
//! stay presentation-free. Output is markdown, suitable for terminals and
//! report files alike.

use std::fmt;

use crate::models::{ColumnDescriptor, TableSummary};

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {}",
            self.ordinal,
            self.name,
            self.decl_type.as_deref().unwrap_or("(untyped)")
        )?;
        if self.primary_key {
            write!(f, " PRIMARY KEY")?;
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        if let Some(default) = &self.default_value {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.table)?;
        writeln!(f)?;
        writeln!(f, "- Rows: {}", self.row_count)?;
        writeln!(f, "- Columns: {}", self.columns.len())?;
        writeln!(f)?;
        writeln!(f, "| # | Column | Type | Non-null |")?;
        writeln!(f, "|---|--------|------|----------|")?;
        for column in &self.columns {
            let non_null = self
                .non_null_count(&column.name)
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "| {} | {} | {} | {non_null} |",
                column.ordinal,
                column.name,
                column.decl_type.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}

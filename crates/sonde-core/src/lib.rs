//! Core library for the Sonde schema-safe database access layer.
//!
//! Sonde is a thin, hardened layer over an embedded SQLite database. SQL
//! placeholders can bind values but never table or column names, so any code
//! that works with dynamically chosen tables has to interpolate names into
//! statement text; this crate confines that interpolation to two pieces:
//!
//! - **Identifiers** ([`ident`]): every dynamic name passes validation once
//!   and is carried as an [`Identifier`] from then on.
//! - **Statement templates** ([`statement`]): the enumerated
//!   [`TemplateKind`] set is the only producer of SQL text; data values are
//!   always bound through placeholders, never concatenated.
//!
//! On top of those sit the [`Database`] handle and its operations, including
//! the [`Database::summarize`] introspection report (row count, column
//! metadata, and per-column non-null counts).
//!
//! # Quick Start
//!
//! ```rust
//! use sonde_core::{ColumnSpec, ColumnType, Database, Identifier, Value};
//!
//! # fn main() -> Result<(), sonde_core::SondeError> {
//! let db = Database::open_in_memory()?;
//!
//! let students = Identifier::new("students")?;
//! let id = Identifier::new("id")?;
//! let name = Identifier::new("name")?;
//!
//! db.create_table(
//!     &students,
//!     &[
//!         ColumnSpec::new(id.clone(), ColumnType::Integer).primary_key(),
//!         ColumnSpec::new(name.clone(), ColumnType::Text),
//!     ],
//! )?;
//!
//! db.insert(
//!     &students,
//!     &[id, name],
//!     vec![Value::Integer(1), Value::Text("Alice".to_string())],
//! )?;
//!
//! let summary = db.summarize(&students)?;
//! assert_eq!(summary.row_count, 1);
//! assert_eq!(summary.non_null_count("name"), Some(1));
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod ident;
pub mod models;
pub mod statement;

// Re-export commonly used types
pub use db::Database;
pub use error::{Result, SondeError};
pub use ident::{Identifier, MAX_IDENTIFIER_LEN};
pub use models::{ColumnDescriptor, TableSummary};
pub use statement::{BoundStatement, ColumnSpec, ColumnType, TemplateKind, Value};

//! Database handle and statement execution.
//!
//! This module provides the connection handle and the two execution
//! primitives (`execute` and `query`) every operation funnels through.
//! Driver errors are classified in one place on the way out, so constraint
//! conflicts and missing tables surface as their own error variants while
//! everything else passes through unchanged.

use std::path::Path;

use log::debug;
use rusqlite::{params_from_iter, Connection};

use crate::error::{DatabaseResultExt, Result};
use crate::statement::{BoundStatement, Value};

pub mod introspect;
pub mod row_ops;
pub mod schema_ops;

/// Database connection and operations handler.
///
/// Wraps a single driver connection. The handle itself holds no other state
/// and performs no locking; callers that need concurrency use one handle per
/// worker.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a database file, creating it if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;
        Ok(Self { connection })
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Ok(Self { connection })
    }

    /// Wraps a connection the caller opened and configured.
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Releases the handle, returning the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.connection
    }

    /// Executes a DML/DDL statement, returning the number of rows changed.
    pub fn execute(&self, statement: &BoundStatement) -> Result<usize> {
        debug!("executing {}: {}", statement.kind(), statement.sql());
        self.connection
            .execute(statement.sql(), params_from_iter(statement.values().iter()))
            .classify(&execution_context(statement))
    }

    /// Runs a query statement, returning every row as generic values.
    pub fn query(&self, statement: &BoundStatement) -> Result<Vec<Vec<Value>>> {
        debug!("querying {}: {}", statement.kind(), statement.sql());
        let mut prepared = self
            .connection
            .prepare(statement.sql())
            .classify(&execution_context(statement))?;
        let column_count = prepared.column_count();
        let rows = prepared
            .query_map(params_from_iter(statement.values().iter()), |row| {
                (0..column_count)
                    .map(|index| row.get::<_, Value>(index))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })
            .classify(&execution_context(statement))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .classify(&execution_context(statement))?;
        Ok(rows)
    }

    /// Runs a single-scalar count statement.
    pub(crate) fn query_count(&self, statement: &BoundStatement) -> Result<u64> {
        self.connection
            .query_row(
                statement.sql(),
                params_from_iter(statement.values().iter()),
                |row| row.get::<_, i64>(0),
            )
            .classify(&execution_context(statement))
            .map(|count| count as u64)
    }
}

fn execution_context(statement: &BoundStatement) -> String {
    format!("Failed to execute {} statement", statement.kind())
}

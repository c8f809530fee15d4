//! Statement templates and the bound-statement builder.
//!
//! This module is the only place in the crate where literal SQL text is
//! produced. Every statement is assembled from a fixed skeleton belonging to
//! one of the enumerated [`TemplateKind`]s; identifier slots are filled with
//! pre-validated [`Identifier`]s in their double-quoted form, and every data
//! value becomes a `?N` placeholder with the value returned alongside the
//! text for binding. Caller-supplied data never appears as SQL text.

use std::fmt;
use std::str::FromStr;

pub use rusqlite::types::Value;

use crate::error::{Result, SondeError};
use crate::ident::Identifier;

/// The fixed set of statement templates the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `SELECT * FROM "t"`
    SelectAll,
    /// `SELECT "c1", .. FROM "t"`
    SelectColumns,
    /// `SELECT * FROM "t" WHERE "c" <= ?1`
    SelectBefore,
    /// `INSERT INTO "t" ("c1", ..) VALUES (?1, ..)`
    Insert,
    /// `INSERT OR IGNORE INTO "t" ("c1", ..) VALUES (?1, ..)`
    InsertOrIgnore,
    /// `UPDATE "t" SET "s1" = ?1, .. WHERE "w" = ?n`
    UpdateWhere,
    /// `CREATE TABLE "t" ("c1", ..)`
    CreateTable,
    /// `ALTER TABLE "t" ADD COLUMN "c"`
    AddColumn,
    /// `CREATE INDEX "i" ON "t" ("c1", ..)`
    CreateIndex,
    /// `DROP INDEX "i"`
    DropIndex,
    /// `PRAGMA table_info("t")`
    PragmaTableInfo,
    /// `SELECT COUNT(*) FROM "t"`
    CountRows,
    /// `SELECT COUNT("c") FROM "t"`
    CountNonNull,
}

impl TemplateKind {
    /// Convert to the canonical template name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::SelectAll => "select_all",
            TemplateKind::SelectColumns => "select_columns",
            TemplateKind::SelectBefore => "select_before",
            TemplateKind::Insert => "insert",
            TemplateKind::InsertOrIgnore => "insert_or_ignore",
            TemplateKind::UpdateWhere => "update_where",
            TemplateKind::CreateTable => "create_table",
            TemplateKind::AddColumn => "add_column",
            TemplateKind::CreateIndex => "create_index",
            TemplateKind::DropIndex => "drop_index",
            TemplateKind::PragmaTableInfo => "pragma_table_info",
            TemplateKind::CountRows => "count_rows",
            TemplateKind::CountNonNull => "count_nonnull",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = SondeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "select_all" => Ok(TemplateKind::SelectAll),
            "select_columns" => Ok(TemplateKind::SelectColumns),
            "select_before" => Ok(TemplateKind::SelectBefore),
            "insert" => Ok(TemplateKind::Insert),
            "insert_or_ignore" => Ok(TemplateKind::InsertOrIgnore),
            "update_where" => Ok(TemplateKind::UpdateWhere),
            "create_table" => Ok(TemplateKind::CreateTable),
            "add_column" => Ok(TemplateKind::AddColumn),
            "create_index" => Ok(TemplateKind::CreateIndex),
            "drop_index" => Ok(TemplateKind::DropIndex),
            "pragma_table_info" => Ok(TemplateKind::PragmaTableInfo),
            "count_rows" => Ok(TemplateKind::CountRows),
            "count_nonnull" => Ok(TemplateKind::CountNonNull),
            _ => Err(SondeError::UnsupportedTemplate {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column type affinities for typed DDL.
///
/// Rendered from a fixed table, never from caller text, so typed column
/// definitions preserve the no-interpolation invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Numeric,
}

impl ColumnType {
    /// Convert to the SQL type name used in column definitions.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Numeric => "NUMERIC",
        }
    }
}

/// A column definition for `CREATE TABLE` and `ALTER TABLE ADD COLUMN`.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    name: Identifier,
    ty: Option<ColumnType>,
    primary_key: bool,
    not_null: bool,
}

impl ColumnSpec {
    /// Creates a typed column definition.
    pub fn new(name: Identifier, ty: ColumnType) -> Self {
        Self {
            name,
            ty: Some(ty),
            primary_key: false,
            not_null: false,
        }
    }

    /// Creates a bare column definition without a declared type.
    ///
    /// SQLite permits typeless columns; they take BLOB affinity.
    pub fn untyped(name: Identifier) -> Self {
        Self {
            name,
            ty: None,
            primary_key: false,
            not_null: false,
        }
    }

    /// Marks the column as the table's primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Adds a NOT NULL constraint to the column.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Returns the column name.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    fn render(&self) -> String {
        let mut definition = self.name.quoted();
        if let Some(ty) = self.ty {
            definition.push(' ');
            definition.push_str(ty.as_sql());
        }
        if self.primary_key {
            definition.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            definition.push_str(" NOT NULL");
        }
        definition
    }
}

/// An SQL template with its ordered bound values.
///
/// The text contains only fixed skeleton fragments, double-quoted validated
/// identifiers, and `?N` placeholders. Built per call and consumed
/// immediately by the driver; never persisted.
#[derive(Debug)]
pub struct BoundStatement {
    kind: TemplateKind,
    sql: String,
    values: Vec<Value>,
}

impl BoundStatement {
    /// Returns the template kind this statement was built from.
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Returns the SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the values in the order they must be bound.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Checks an exact identifier count for a template.
fn require_identifiers(
    kind: TemplateKind,
    identifiers: &[Identifier],
    expected: usize,
) -> Result<()> {
    if identifiers.len() != expected {
        return Err(SondeError::ArityMismatch {
            kind,
            slot: "identifiers",
            expected,
            actual: identifiers.len(),
        });
    }
    Ok(())
}

/// Checks a minimum identifier count for variadic templates.
fn require_min_identifiers(
    kind: TemplateKind,
    identifiers: &[Identifier],
    minimum: usize,
) -> Result<()> {
    if identifiers.len() < minimum {
        return Err(SondeError::ArityMismatch {
            kind,
            slot: "identifiers",
            expected: minimum,
            actual: identifiers.len(),
        });
    }
    Ok(())
}

/// Checks an exact value count for a template.
fn require_values(kind: TemplateKind, values: &[Value], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(SondeError::ArityMismatch {
            kind,
            slot: "values",
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Renders a comma-separated list of quoted identifiers.
fn column_list(columns: &[Identifier]) -> String {
    columns
        .iter()
        .map(Identifier::quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `?1, ?2, ..` for `count` placeholders starting at `start`.
fn placeholder_list(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds a bound statement from a template kind, validated identifiers, and
/// data values.
///
/// Identifier slots are filled in the order given; the leading identifier is
/// the table name for every kind except `CreateIndex` and `DropIndex`, where
/// it is the index name. Values are returned unchanged in binding order.
///
/// # Errors
///
/// Returns `SondeError::ArityMismatch` when the identifier or value count
/// does not match the template's requirement.
pub fn build(
    kind: TemplateKind,
    identifiers: &[Identifier],
    values: Vec<Value>,
) -> Result<BoundStatement> {
    let sql = match kind {
        TemplateKind::SelectAll => {
            require_identifiers(kind, identifiers, 1)?;
            require_values(kind, &values, 0)?;
            format!("SELECT * FROM {}", identifiers[0].quoted())
        }
        TemplateKind::SelectColumns => {
            require_min_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, 0)?;
            format!(
                "SELECT {} FROM {}",
                column_list(&identifiers[1..]),
                identifiers[0].quoted()
            )
        }
        TemplateKind::SelectBefore => {
            require_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, 1)?;
            format!(
                "SELECT * FROM {} WHERE {} <= ?1",
                identifiers[0].quoted(),
                identifiers[1].quoted()
            )
        }
        TemplateKind::Insert | TemplateKind::InsertOrIgnore => {
            require_min_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, identifiers.len() - 1)?;
            let keyword = if kind == TemplateKind::Insert {
                "INSERT"
            } else {
                "INSERT OR IGNORE"
            };
            format!(
                "{keyword} INTO {} ({}) VALUES ({})",
                identifiers[0].quoted(),
                column_list(&identifiers[1..]),
                placeholder_list(1, values.len())
            )
        }
        TemplateKind::UpdateWhere => {
            require_min_identifiers(kind, identifiers, 3)?;
            require_values(kind, &values, identifiers.len() - 1)?;
            let set_columns = &identifiers[1..identifiers.len() - 1];
            let predicate = &identifiers[identifiers.len() - 1];
            let assignments = set_columns
                .iter()
                .enumerate()
                .map(|(index, column)| format!("{} = ?{}", column.quoted(), index + 1))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "UPDATE {} SET {assignments} WHERE {} = ?{}",
                identifiers[0].quoted(),
                predicate.quoted(),
                set_columns.len() + 1
            )
        }
        TemplateKind::CreateTable => {
            require_min_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, 0)?;
            let columns: Vec<ColumnSpec> = identifiers[1..]
                .iter()
                .map(|name| ColumnSpec::untyped(name.clone()))
                .collect();
            return build_create_table(&identifiers[0], &columns);
        }
        TemplateKind::AddColumn => {
            require_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, 0)?;
            return Ok(build_add_column(
                &identifiers[0],
                &ColumnSpec::untyped(identifiers[1].clone()),
            ));
        }
        TemplateKind::CreateIndex => {
            require_min_identifiers(kind, identifiers, 3)?;
            require_values(kind, &values, 0)?;
            format!(
                "CREATE INDEX {} ON {} ({})",
                identifiers[0].quoted(),
                identifiers[1].quoted(),
                column_list(&identifiers[2..])
            )
        }
        TemplateKind::DropIndex => {
            require_identifiers(kind, identifiers, 1)?;
            require_values(kind, &values, 0)?;
            format!("DROP INDEX {}", identifiers[0].quoted())
        }
        TemplateKind::PragmaTableInfo => {
            require_identifiers(kind, identifiers, 1)?;
            require_values(kind, &values, 0)?;
            format!("PRAGMA table_info({})", identifiers[0].quoted())
        }
        TemplateKind::CountRows => {
            require_identifiers(kind, identifiers, 1)?;
            require_values(kind, &values, 0)?;
            format!("SELECT COUNT(*) FROM {}", identifiers[0].quoted())
        }
        TemplateKind::CountNonNull => {
            require_identifiers(kind, identifiers, 2)?;
            require_values(kind, &values, 0)?;
            format!(
                "SELECT COUNT({}) FROM {}",
                identifiers[1].quoted(),
                identifiers[0].quoted()
            )
        }
    };

    Ok(BoundStatement { kind, sql, values })
}

/// Builds a typed `CREATE TABLE` statement from column definitions.
///
/// Type names come from the closed [`ColumnType`] table, so the statement
/// text still contains nothing caller-controlled beyond validated
/// identifiers.
///
/// # Errors
///
/// Returns `SondeError::ArityMismatch` when no columns are given.
pub fn build_create_table(table: &Identifier, columns: &[ColumnSpec]) -> Result<BoundStatement> {
    if columns.is_empty() {
        return Err(SondeError::ArityMismatch {
            kind: TemplateKind::CreateTable,
            slot: "columns",
            expected: 1,
            actual: 0,
        });
    }
    let definitions = columns
        .iter()
        .map(ColumnSpec::render)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(BoundStatement {
        kind: TemplateKind::CreateTable,
        sql: format!("CREATE TABLE {} ({definitions})", table.quoted()),
        values: Vec::new(),
    })
}

/// Builds a typed `ALTER TABLE .. ADD COLUMN` statement.
pub fn build_add_column(table: &Identifier, column: &ColumnSpec) -> BoundStatement {
    BoundStatement {
        kind: TemplateKind::AddColumn,
        sql: format!(
            "ALTER TABLE {} ADD COLUMN {}",
            table.quoted(),
            column.render()
        ),
        values: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name).expect("valid identifier")
    }

    #[test]
    fn test_select_all() {
        let stmt = build(TemplateKind::SelectAll, &[ident("students")], vec![])
            .expect("should build");
        assert_eq!(stmt.sql(), "SELECT * FROM \"students\"");
        assert!(stmt.values().is_empty());
    }

    #[test]
    fn test_select_columns() {
        let stmt = build(
            TemplateKind::SelectColumns,
            &[ident("students"), ident("id"), ident("name")],
            vec![],
        )
        .expect("should build");
        assert_eq!(stmt.sql(), "SELECT \"id\", \"name\" FROM \"students\"");
    }

    #[test]
    fn test_select_before_binds_cutoff() {
        let stmt = build(
            TemplateKind::SelectBefore,
            &[ident("entries"), ident("created_at")],
            vec![Value::Text("2026-08-05T00:00:00Z".to_string())],
        )
        .expect("should build");
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM \"entries\" WHERE \"created_at\" <= ?1"
        );
        assert_eq!(stmt.values().len(), 1);
    }

    #[test]
    fn test_insert_placeholders_match_values() {
        let stmt = build(
            TemplateKind::Insert,
            &[ident("students"), ident("id"), ident("name")],
            vec![Value::Integer(1), Value::Text("Alice".to_string())],
        )
        .expect("should build");
        assert_eq!(
            stmt.sql(),
            "INSERT INTO \"students\" (\"id\", \"name\") VALUES (?1, ?2)"
        );
        assert_eq!(stmt.sql().matches('?').count(), stmt.values().len());
        // Data must never appear as literal SQL text.
        assert!(!stmt.sql().contains("Alice"));
    }

    #[test]
    fn test_insert_or_ignore_keyword() {
        let stmt = build(
            TemplateKind::InsertOrIgnore,
            &[ident("students"), ident("id")],
            vec![Value::Integer(1)],
        )
        .expect("should build");
        assert!(stmt.sql().starts_with("INSERT OR IGNORE INTO"));
    }

    #[test]
    fn test_update_where() {
        let stmt = build(
            TemplateKind::UpdateWhere,
            &[ident("students"), ident("name"), ident("age"), ident("id")],
            vec![
                Value::Text("Bob".to_string()),
                Value::Integer(20),
                Value::Integer(1),
            ],
        )
        .expect("should build");
        assert_eq!(
            stmt.sql(),
            "UPDATE \"students\" SET \"name\" = ?1, \"age\" = ?2 WHERE \"id\" = ?3"
        );
        assert!(!stmt.sql().contains("Bob"));
    }

    #[test]
    fn test_create_table_untyped() {
        let stmt = build(
            TemplateKind::CreateTable,
            &[ident("notes"), ident("id"), ident("body")],
            vec![],
        )
        .expect("should build");
        assert_eq!(stmt.sql(), "CREATE TABLE \"notes\" (\"id\", \"body\")");
    }

    #[test]
    fn test_create_table_typed() {
        let stmt = build_create_table(
            &ident("students"),
            &[
                ColumnSpec::new(ident("id"), ColumnType::Integer).primary_key(),
                ColumnSpec::new(ident("name"), ColumnType::Text).not_null(),
            ],
        )
        .expect("should build");
        assert_eq!(
            stmt.sql(),
            "CREATE TABLE \"students\" (\"id\" INTEGER PRIMARY KEY, \"name\" TEXT NOT NULL)"
        );
    }

    #[test]
    fn test_add_column_typed() {
        let stmt = build_add_column(
            &ident("students"),
            &ColumnSpec::new(ident("email"), ColumnType::Text),
        );
        assert_eq!(
            stmt.sql(),
            "ALTER TABLE \"students\" ADD COLUMN \"email\" TEXT"
        );
    }

    #[test]
    fn test_create_and_drop_index() {
        let stmt = build(
            TemplateKind::CreateIndex,
            &[ident("idx_name"), ident("students"), ident("name")],
            vec![],
        )
        .expect("should build");
        assert_eq!(
            stmt.sql(),
            "CREATE INDEX \"idx_name\" ON \"students\" (\"name\")"
        );

        let stmt = build(TemplateKind::DropIndex, &[ident("idx_name")], vec![])
            .expect("should build");
        assert_eq!(stmt.sql(), "DROP INDEX \"idx_name\"");
    }

    #[test]
    fn test_introspection_skeletons() {
        let stmt = build(TemplateKind::PragmaTableInfo, &[ident("students")], vec![])
            .expect("should build");
        assert_eq!(stmt.sql(), "PRAGMA table_info(\"students\")");

        let stmt = build(TemplateKind::CountRows, &[ident("students")], vec![])
            .expect("should build");
        assert_eq!(stmt.sql(), "SELECT COUNT(*) FROM \"students\"");

        let stmt = build(
            TemplateKind::CountNonNull,
            &[ident("students"), ident("name")],
            vec![],
        )
        .expect("should build");
        assert_eq!(stmt.sql(), "SELECT COUNT(\"name\") FROM \"students\"");
    }

    #[test]
    fn test_arity_mismatch_identifiers() {
        let err = build(TemplateKind::SelectAll, &[], vec![]).unwrap_err();
        match err {
            SondeError::ArityMismatch {
                kind,
                slot,
                expected,
                actual,
            } => {
                assert_eq!(kind, TemplateKind::SelectAll);
                assert_eq!(slot, "identifiers");
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("Expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_arity_mismatch_values() {
        let err = build(
            TemplateKind::Insert,
            &[ident("students"), ident("id"), ident("name")],
            vec![Value::Integer(1)],
        )
        .unwrap_err();
        match err {
            SondeError::ArityMismatch { slot, expected, actual, .. } => {
                assert_eq!(slot, "values");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_template_kind_from_str() {
        assert_eq!(
            "count_nonnull".parse::<TemplateKind>().expect("known"),
            TemplateKind::CountNonNull
        );

        let err = "merge_upsert".parse::<TemplateKind>().unwrap_err();
        match err {
            SondeError::UnsupportedTemplate { kind } => assert_eq!(kind, "merge_upsert"),
            other => panic!("Expected UnsupportedTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_count_equals_value_count() {
        let cases = vec![
            build(
                TemplateKind::Insert,
                &[ident("t"), ident("a"), ident("b"), ident("c")],
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
            ),
            build(
                TemplateKind::UpdateWhere,
                &[ident("t"), ident("a"), ident("b")],
                vec![Value::Integer(1), Value::Integer(2)],
            ),
            build(
                TemplateKind::SelectBefore,
                &[ident("t"), ident("a")],
                vec![Value::Integer(1)],
            ),
        ];
        for stmt in cases {
            let stmt = stmt.expect("should build");
            assert_eq!(stmt.sql().matches('?').count(), stmt.values().len());
        }
    }
}

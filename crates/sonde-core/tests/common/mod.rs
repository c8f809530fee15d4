use sonde_core::{ColumnSpec, ColumnType, Database, Identifier};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::open(temp_file.path()).expect("Failed to open test database");
    (temp_file, db)
}

/// Shorthand for a validated identifier in tests.
pub fn ident(name: &str) -> Identifier {
    Identifier::new(name).expect("valid identifier")
}

/// Creates the `students (id INTEGER PRIMARY KEY, name TEXT)` table used
/// across tests.
pub fn create_students_table(db: &Database) -> Identifier {
    let students = ident("students");
    db.create_table(
        &students,
        &[
            ColumnSpec::new(ident("id"), ColumnType::Integer).primary_key(),
            ColumnSpec::new(ident("name"), ColumnType::Text),
        ],
    )
    .expect("Failed to create students table");
    students
}

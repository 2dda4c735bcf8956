/*! This module defines and implements traits for interacting with the application's database. */

use rusqlite::{Connection, Row};

use crate::{
    Error,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table(s) for the model if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type a row is converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type.
    ///
    /// The `offset` indicates which column the row should be read from.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the `income`, `expense` and `category` tables if they do not exist.
///
/// Existing data is left untouched, so this is safe to call every time the
/// application starts.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if the database cannot be written
/// to, or an [Error::SqlError] for any other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;

    transaction.commit()?;

    tracing::debug!("database tables are ready");

    Ok(())
}

/// Open the SQLite database at `path` and make sure its tables exist.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if the database file cannot be
/// opened or initialised.
pub fn open(path: &str) -> Result<Connection, Error> {
    let connection = Connection::open(path).map_err(|error| {
        tracing::error!("could not open the database at {path}: {error}");
        Error::StorageUnavailable(format!("could not open {path}: {error}"))
    })?;

    initialize(&connection).map_err(|error| match error {
        Error::SqlError(error) => Error::StorageUnavailable(error.to_string()),
        error => error,
    })?;

    Ok(connection)
}

#[cfg(test)]
mod db_tests {
    use std::fs;

    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::Error;

    use super::{initialize, open};

    fn table_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|name| name.unwrap())
            .collect()
    }

    #[test]
    fn initialize_creates_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(
            table_names(&connection),
            vec!["category".to_owned(), "expense".to_owned(), "income".to_owned()]
        );
    }

    #[test]
    fn initialize_twice_keeps_data() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute("INSERT INTO category (name) VALUES ('Food')", ())
            .unwrap();

        initialize(&connection).unwrap();

        let count: i64 = connection
            .query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn open_creates_tables_in_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.db");

        let connection = open(path.to_str().unwrap()).unwrap();

        assert_eq!(
            table_names(&connection),
            vec!["category".to_owned(), "expense".to_owned(), "income".to_owned()]
        );
    }

    #[test]
    fn open_keeps_data_between_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.db");
        let path = path.to_str().unwrap();
        open(path)
            .unwrap()
            .execute("INSERT INTO category (name) VALUES ('Food')", ())
            .unwrap();

        let connection = open(path).unwrap();

        let count: i64 = connection
            .query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn open_non_database_file_is_storage_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "these are notes and not a database\n".repeat(64)).unwrap();

        let result = open(path.to_str().unwrap());

        assert!(
            matches!(result, Err(Error::StorageUnavailable(_))),
            "got {result:?}"
        );
    }
}

//! A personal budget tracker.
//!
//! Income and expense transactions are recorded against user-defined
//! categories and kept in a SQLite database. The [report] module computes the
//! all-time balance and monthly totals from the stored transactions.
//!
//! Storage sits behind the [stores::TransactionStore] and
//! [stores::CategoryStore] traits. The SQLite implementations live in
//! [stores::sqlite] and in-memory implementations with the same behaviour live
//! in [stores::memory]. A [BudgetTracker] ties the stores to the local clock
//! and validates raw user input.

#![warn(missing_docs)]

mod currency;
mod database_id;
pub mod db;
mod logging;
pub mod models;
pub mod report;
pub mod stores;
mod timezone;
mod tracker;

pub use currency::format_rupiah;
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use logging::setup_logging;
pub use report::MonthlyReport;
pub use timezone::{get_local_offset, local_now};
pub use tracker::BudgetTracker;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount entered for a transaction is not a finite number.
    ///
    /// Holds the text that failed to parse.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An empty string was used as a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A month number outside of 1-12 was given.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// A date could not be constructed, e.g. the year is out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The canonical timezone name could not be resolved.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The database could not be opened or set up.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if matches!(
                    sql_error.code,
                    rusqlite::ErrorCode::CannotOpen
                        | rusqlite::ErrorCode::NotADatabase
                        | rusqlite::ErrorCode::ReadOnly
                        | rusqlite::ErrorCode::SystemIoFailure
                        | rusqlite::ErrorCode::DiskFull
                ) =>
            {
                tracing::error!("the database is unavailable: {}", sql_error);
                Error::StorageUnavailable(sql_error.to_string())
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use crate::Error;

    #[test]
    fn sql_errors_are_wrapped() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::SqlError(rusqlite::Error::QueryReturnedNoRows));
    }

    #[test]
    fn cannot_open_is_storage_unavailable() {
        let sql_error = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
            None,
        );

        let error: Error = sql_error.into();

        assert!(matches!(error, Error::StorageUnavailable(_)));
    }
}

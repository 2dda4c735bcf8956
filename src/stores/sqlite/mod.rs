//! SQLite backed stores.
//!
//! Both stores share one connection. Each store call holds the lock for a
//! single statement.

mod category;
mod transaction;

pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{BudgetTracker, Error, db::initialize};

/// An alias for a [BudgetTracker] that uses SQLite for the backend.
pub type SQLiteBudgetTracker = BudgetTracker<SQLiteTransactionStore, SQLiteCategoryStore>;

/// Creates a [BudgetTracker] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database if they are missing.
/// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Jakarta".
///
/// # Errors
/// Returns an error if the database cannot be initialised or the timezone is
/// not known.
pub fn create_budget_tracker(
    db_connection: Connection,
    local_timezone: &str,
) -> Result<SQLiteBudgetTracker, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    BudgetTracker::with_timezone(
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteCategoryStore::new(connection),
        local_timezone,
    )
}

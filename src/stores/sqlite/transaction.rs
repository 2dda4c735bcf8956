//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{CategoryName, Transaction, TransactionBuilder, TransactionKind},
    stores::{TransactionQuery, TransactionStore},
};

/// Stores incomes and expenses in two tables of a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The tables must already exist, see [initialize](crate::db::initialize).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLockError)
    }

    /// Build the `WHERE` clause for the date range of `query`.
    fn where_clause(query: &TransactionQuery) -> (String, Vec<Value>) {
        match &query.date_range {
            Some(date_range) => (
                " WHERE date >= ?1 AND date < ?2".to_owned(),
                vec![
                    Value::Text(format_date(&date_range.start)),
                    Value::Text(format_date(&date_range.end)),
                ],
            ),
            None => (String::new(), Vec::new()),
        }
    }
}

/// The table that holds transactions of `kind`.
fn table_name(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn kind_from_table_name(name: &str, column: usize) -> Result<TransactionKind, rusqlite::Error> {
    TransactionKind::ALL
        .into_iter()
        .find(|kind| table_name(*kind) == name)
        .ok_or(rusqlite::Error::InvalidColumnType(
            column,
            name.to_owned(),
            rusqlite::types::Type::Text,
        ))
}

/// Dates are stored as fixed width text so that string comparison in SQL
/// matches chronological order.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
);

fn format_date(date: &PrimitiveDateTime) -> String {
    // The format only contains components that every PrimitiveDateTime has.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

fn parse_date(text: &str, column: usize) -> Result<PrimitiveDateTime, rusqlite::Error> {
    PrimitiveDateTime::parse(text, DATE_FORMAT).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(error),
        )
    })
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert a new row into the `income` or `expense` table.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        connection.execute(
            &format!(
                "INSERT INTO {} (amount, category, date) VALUES (?1, ?2, ?3)",
                table_name(builder.kind)
            ),
            (
                builder.amount,
                builder.category.as_ref(),
                format_date(&builder.date),
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(builder.finalise(id))
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let (where_clause, parameters) = Self::where_clause(&query);
        let mut transactions = Vec::new();

        for kind in query.kinds() {
            let query_string = format!(
                "SELECT id, amount, category, date, '{table}' FROM {table}{where_clause} ORDER BY id ASC",
                table = table_name(kind)
            );

            let rows = connection
                .prepare(&query_string)?
                .query_map(params_from_iter(parameters.iter()), Self::map_row)?
                .collect::<Result<Vec<_>, _>>()?;

            transactions.extend(rows);
        }

        Ok(transactions)
    }

    /// Sum the transaction amounts in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn total(&self, query: TransactionQuery) -> Result<f64, Error> {
        let connection = self.lock()?;
        let (where_clause, parameters) = Self::where_clause(&query);
        let mut total = 0.0;

        for kind in query.kinds() {
            let query_string = format!(
                "SELECT COALESCE(SUM(amount), 0.0) FROM {}{where_clause}",
                table_name(kind)
            );

            let sum: f64 = connection.query_row(
                &query_string,
                params_from_iter(parameters.iter()),
                |row| row.get(0),
            )?;

            total += sum;
        }

        Ok(total)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        for kind in TransactionKind::ALL {
            connection.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id INTEGER PRIMARY KEY,
                        amount REAL NOT NULL,
                        category TEXT NOT NULL,
                        date TEXT NOT NULL
                    )",
                    table_name(kind)
                ),
                (),
            )?;
        }

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    /// Expects the columns `id, amount, category, date` followed by the name
    /// of the table the row was selected from.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let raw_category: String = row.get(offset + 2)?;
        let raw_date: String = row.get(offset + 3)?;
        let date = parse_date(&raw_date, offset + 3)?;
        let raw_table: String = row.get(offset + 4)?;
        let kind = kind_from_table_name(&raw_table, offset + 4)?;

        let category = CategoryName::new_unchecked(&raw_category);

        Ok(Transaction::build(kind, amount, category, date).finalise(id))
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        models::{CategoryName, Transaction, TransactionKind},
        stores::{TransactionQuery, TransactionStore},
    };

    use super::SQLiteTransactionStore;

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn create(
        store: &mut SQLiteTransactionStore,
        kind: TransactionKind,
        amount: f64,
        date: time::PrimitiveDateTime,
    ) -> Transaction {
        store
            .create(Transaction::build(
                kind,
                amount,
                CategoryName::new_unchecked("Test"),
                date,
            ))
            .unwrap()
    }

    #[test]
    fn create_assigns_ids_per_kind() {
        let mut store = get_test_store();

        let income = create(
            &mut store,
            TransactionKind::Income,
            1.0,
            datetime!(2024-01-01 0:00),
        );
        let expense = create(
            &mut store,
            TransactionKind::Expense,
            2.0,
            datetime!(2024-01-01 0:00),
        );

        assert_eq!(income.id, 1);
        assert_eq!(expense.id, 1);
        assert_eq!(expense.kind, TransactionKind::Expense);
    }

    #[test]
    fn get_query_lists_incomes_then_expenses_in_insertion_order() {
        let mut store = get_test_store();
        let want = vec![
            create(
                &mut store,
                TransactionKind::Expense,
                3.0,
                datetime!(2024-01-03 0:00),
            ),
            create(
                &mut store,
                TransactionKind::Income,
                2.0,
                datetime!(2024-01-05 0:00),
            ),
            create(
                &mut store,
                TransactionKind::Income,
                1.0,
                datetime!(2024-01-01 0:00),
            ),
        ];

        let got = store.get_query(TransactionQuery::default()).unwrap();

        assert_eq!(got, vec![want[1].clone(), want[2].clone(), want[0].clone()]);
    }

    #[test]
    fn get_query_round_trips_sub_second_dates() {
        let mut store = get_test_store();
        let want = create(
            &mut store,
            TransactionKind::Income,
            1.5,
            datetime!(2024-02-29 23:59:59.123456),
        );

        let got = store
            .get_query(TransactionQuery::kind(TransactionKind::Income))
            .unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn date_range_is_half_open() {
        let mut store = get_test_store();
        let start = create(
            &mut store,
            TransactionKind::Income,
            1.0,
            datetime!(2024-12-01 0:00),
        );
        let last = create(
            &mut store,
            TransactionKind::Expense,
            2.0,
            datetime!(2024-12-31 23:59:59.999999),
        );
        create(
            &mut store,
            TransactionKind::Income,
            4.0,
            datetime!(2025-01-01 0:00),
        );
        create(
            &mut store,
            TransactionKind::Expense,
            8.0,
            datetime!(2024-11-30 23:59:59),
        );
        let query = TransactionQuery::default()
            .within(datetime!(2024-12-01 0:00)..datetime!(2025-01-01 0:00));

        let got = store.get_query(query.clone()).unwrap();
        let total = store.total(query).unwrap();

        assert_eq!(got, vec![start, last]);
        assert_eq!(total, 3.0);
    }

    #[test]
    fn total_of_empty_store_is_zero() {
        let store = get_test_store();

        let income = store
            .total(TransactionQuery::kind(TransactionKind::Income))
            .unwrap();
        let expense = store
            .total(TransactionQuery::kind(TransactionKind::Expense))
            .unwrap();

        assert_eq!(income, 0.0);
        assert_eq!(expense, 0.0);
    }

    #[test]
    fn total_sums_only_selected_kind() {
        let mut store = get_test_store();
        create(
            &mut store,
            TransactionKind::Income,
            500000.0,
            datetime!(2024-06-01 12:00),
        );
        create(
            &mut store,
            TransactionKind::Income,
            250.5,
            datetime!(2024-07-01 12:00),
        );
        create(
            &mut store,
            TransactionKind::Expense,
            150000.0,
            datetime!(2024-06-01 12:00),
        );

        let income = store
            .total(TransactionQuery::kind(TransactionKind::Income))
            .unwrap();

        assert_eq!(income, 500250.5);
    }
}

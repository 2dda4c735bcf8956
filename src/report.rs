//! Computes the balance and monthly summaries from a [TransactionStore].
//!
//! Nothing here is cached, every call queries the store again.

use std::ops::Range;

use serde::Serialize;
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    Error,
    models::{Transaction, TransactionKind},
    stores::{TransactionQuery, TransactionStore},
};

/// The totals and transactions of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// The month the report covers.
    pub month: Month,
    /// The year the report covers.
    pub year: i32,
    /// The sum of all incomes in the month.
    pub total_income: f64,
    /// The sum of all expenses in the month.
    pub total_expense: f64,
    /// The incomes followed by the expenses of the month.
    pub records: Vec<Transaction>,
}

impl MonthlyReport {
    /// The income of the month minus its expenses.
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }

    /// The percentage of the month's turnover (income plus expenses) that
    /// was income.
    ///
    /// Zero if there was no turnover.
    pub fn income_share(&self) -> f64 {
        self.share(self.total_income)
    }

    /// The percentage of the month's turnover (income plus expenses) that
    /// was spent.
    ///
    /// Zero if there was no turnover.
    pub fn expense_share(&self) -> f64 {
        self.share(self.total_expense)
    }

    fn share(&self, part: f64) -> f64 {
        let turnover = self.total_income + self.total_expense;

        if turnover == 0.0 {
            0.0
        } else {
            part / turnover * 100.0
        }
    }
}

/// The half-open range from midnight on the first day of `month` to midnight
/// on the first day of the following month.
///
/// December ends at the start of January of the next year.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is not in 1-12, or
/// [Error::InvalidDate] if `year` is out of the supported range.
pub fn month_range(month: u8, year: i32) -> Result<Range<PrimitiveDateTime>, Error> {
    let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;

    let (next_year, next_month) = match month {
        Month::December => (
            year.checked_add(1)
                .ok_or_else(|| Error::InvalidDate(format!("year {year} has no successor")))?,
            Month::January,
        ),
        month => (year, month.next()),
    };

    Ok(first_of_month(year, month)?..first_of_month(next_year, next_month)?)
}

fn first_of_month(year: i32, month: Month) -> Result<PrimitiveDateTime, Error> {
    Date::from_calendar_date(year, month, 1)
        .map(Date::midnight)
        .map_err(|error| Error::InvalidDate(error.to_string()))
}

/// Summarise the transactions dated within `month` of `year`.
///
/// A month without transactions gives zero totals and no records.
///
/// # Errors
/// Returns an error if the month is invalid or the store query fails.
pub fn monthly_report<T>(store: &T, month: u8, year: i32) -> Result<MonthlyReport, Error>
where
    T: TransactionStore,
{
    let date_range = month_range(month, year)?;

    let total_income =
        store.total(TransactionQuery::kind(TransactionKind::Income).within(date_range.clone()))?;
    let total_expense =
        store.total(TransactionQuery::kind(TransactionKind::Expense).within(date_range.clone()))?;
    let records = store.get_query(TransactionQuery::default().within(date_range.clone()))?;

    tracing::debug!(
        "report for {:?}: income {total_income}, expense {total_expense}, {} records",
        date_range,
        records.len()
    );

    Ok(MonthlyReport {
        month: date_range.start.month(),
        year,
        total_income,
        total_expense,
        records,
    })
}

/// The sum of all incomes minus the sum of all expenses ever recorded.
///
/// # Errors
/// Returns an error if the store query fails.
pub fn current_balance<T>(store: &T) -> Result<f64, Error>
where
    T: TransactionStore,
{
    let total_income = store.total(TransactionQuery::kind(TransactionKind::Income))?;
    let total_expense = store.total(TransactionQuery::kind(TransactionKind::Expense))?;

    Ok(total_income - total_expense)
}

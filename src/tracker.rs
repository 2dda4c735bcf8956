//! Implements the object that holds the stores and turns user input into
//! store operations.

use time::{PrimitiveDateTime, UtcOffset};

use crate::{
    Error,
    models::{Category, CategoryName, Transaction, TransactionKind, parse_amount},
    report::{self, MonthlyReport},
    stores::{CategoryStore, TransactionQuery, TransactionStore},
    timezone::{get_local_offset, local_now},
};

/// The budget tracker application.
///
/// Owns the transaction and category stores and knows the local UTC offset
/// used to timestamp new transactions.
#[derive(Debug, Clone)]
pub struct BudgetTracker<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    transaction_store: T,
    category_store: C,
    local_offset: UtcOffset,
}

impl<T, C> BudgetTracker<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    /// Create a tracker that timestamps transactions at `local_offset`.
    pub fn new(transaction_store: T, category_store: C, local_offset: UtcOffset) -> Self {
        Self {
            transaction_store,
            category_store,
            local_offset,
        }
    }

    /// Create a tracker for a canonical timezone name, e.g. "Asia/Jakarta".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone is not known.
    pub fn with_timezone(
        transaction_store: T,
        category_store: C,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        let local_offset = get_local_offset(local_timezone)
            .ok_or_else(|| Error::InvalidTimezone(local_timezone.to_owned()))?;

        Ok(Self::new(transaction_store, category_store, local_offset))
    }

    /// The current local date and time.
    pub fn now(&self) -> PrimitiveDateTime {
        local_now(self.local_offset)
    }

    /// Record money earned now.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `raw_amount` is not a number,
    /// [Error::EmptyCategoryName] if `raw_category` is empty, or an error from
    /// the store. Nothing is stored on error.
    pub fn record_income(
        &mut self,
        raw_amount: &str,
        raw_category: &str,
    ) -> Result<Transaction, Error> {
        self.record(TransactionKind::Income, raw_amount, raw_category)
    }

    /// Record money spent now.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `raw_amount` is not a number,
    /// [Error::EmptyCategoryName] if `raw_category` is empty, or an error from
    /// the store. Nothing is stored on error.
    pub fn record_expense(
        &mut self,
        raw_amount: &str,
        raw_category: &str,
    ) -> Result<Transaction, Error> {
        self.record(TransactionKind::Expense, raw_amount, raw_category)
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        raw_amount: &str,
        raw_category: &str,
    ) -> Result<Transaction, Error> {
        let amount = parse_amount(raw_amount)?;
        let category = CategoryName::new(raw_category)?;
        let date = self.now();

        let transaction = self
            .transaction_store
            .create(Transaction::build(kind, amount, category, date))?;

        tracing::info!(
            "recorded {} #{} of {} in {}",
            transaction.kind,
            transaction.id,
            transaction.amount,
            transaction.category
        );

        Ok(transaction)
    }

    /// Add a category. Names that already exist are added again.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if `raw_name` is empty or an error
    /// from the store.
    pub fn add_category(&mut self, raw_name: &str) -> Result<Category, Error> {
        let name = CategoryName::new(raw_name)?;
        let category = self.category_store.create(name)?;

        tracing::info!("added category #{} {}", category.id, category.name);

        Ok(category)
    }

    /// Remove the oldest category called `raw_name`.
    ///
    /// Returns `false` if no category has that name.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if `raw_name` is empty or an error
    /// from the store.
    pub fn remove_category(&mut self, raw_name: &str) -> Result<bool, Error> {
        let name = CategoryName::new(raw_name)?;
        let removed = self.category_store.delete_by_name(&name)?;

        if removed {
            tracing::info!("removed category {name}");
        } else {
            tracing::debug!("no category called {name} to remove");
        }

        Ok(removed)
    }

    /// All categories in the order they were added.
    ///
    /// # Errors
    /// Returns an error from the store.
    pub fn categories(&self) -> Result<Vec<Category>, Error> {
        self.category_store.get_all()
    }

    /// Every transaction, incomes first, each kind in the order recorded.
    ///
    /// # Errors
    /// Returns an error from the store.
    pub fn history(&self) -> Result<Vec<Transaction>, Error> {
        let transactions = self
            .transaction_store
            .get_query(TransactionQuery::default())?;

        tracing::debug!("loaded {} transactions", transactions.len());

        Ok(transactions)
    }

    /// All income minus all expenses.
    ///
    /// # Errors
    /// Returns an error from the store.
    pub fn current_balance(&self) -> Result<f64, Error> {
        report::current_balance(&self.transaction_store)
    }

    /// The report for `month` (1-12) of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not in 1-12 or an error
    /// from the store.
    pub fn monthly_report(&self, month: u8, year: i32) -> Result<MonthlyReport, Error> {
        report::monthly_report(&self.transaction_store, month, year)
    }

    /// The report for the month that contains the current local date.
    ///
    /// # Errors
    /// Returns an error from the store.
    pub fn current_month_report(&self) -> Result<MonthlyReport, Error> {
        let now = self.now();

        self.monthly_report(now.month().into(), now.year())
    }

    /// The store holding incomes and expenses.
    pub fn transaction_store(&self) -> &T {
        &self.transaction_store
    }

    /// Mutable access to the store holding incomes and expenses, e.g. for
    /// adding transactions with a specific date.
    pub fn transaction_store_mut(&mut self) -> &mut T {
        &mut self.transaction_store
    }
}

//! Defines the transaction store trait.

use std::ops::Range;

use time::PrimitiveDateTime;

use crate::{
    Error,
    models::{Transaction, TransactionBuilder, TransactionKind},
};

/// Handles the creation, retrieval and aggregation of incomes and expenses.
pub trait TransactionStore {
    /// Create a new transaction in the collection for the builder's kind.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    ///
    /// Incomes are listed before expenses and each kind is in the order the
    /// transactions were stored.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Sum the amounts of the transactions selected by `query`.
    ///
    /// Returns zero if no transactions match.
    fn total(&self, query: TransactionQuery) -> Result<f64, Error>;
}

/// Defines which transactions are selected by [TransactionStore::get_query]
/// and [TransactionStore::total].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions of this kind. `None` includes both kinds.
    pub kind: Option<TransactionKind>,
    /// Include transactions dated within `date_range` (end exclusive).
    pub date_range: Option<Range<PrimitiveDateTime>>,
}

impl TransactionQuery {
    /// Select every transaction of `kind`.
    pub fn kind(kind: TransactionKind) -> Self {
        Self {
            kind: Some(kind),
            date_range: None,
        }
    }

    /// Restrict the query to transactions dated within `date_range`.
    pub fn within(mut self, date_range: Range<PrimitiveDateTime>) -> Self {
        self.date_range = Some(date_range);
        self
    }

    /// The kinds selected by this query, incomes first.
    pub(crate) fn kinds(&self) -> Vec<TransactionKind> {
        match self.kind {
            Some(kind) => vec![kind],
            None => TransactionKind::ALL.to_vec(),
        }
    }

    /// Whether a transaction dated `date` falls within the date range.
    pub(crate) fn includes_date(&self, date: &PrimitiveDateTime) -> bool {
        self.date_range
            .as_ref()
            .is_none_or(|date_range| date_range.contains(date))
    }
}

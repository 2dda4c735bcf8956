//! Implements an in-memory transaction store.

use crate::{
    DatabaseId, Error,
    models::{Transaction, TransactionBuilder, TransactionKind},
    stores::{TransactionQuery, TransactionStore},
};

/// Keeps incomes and expenses in two vectors in the order they were created.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
}

impl MemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, kind: TransactionKind) -> &Vec<Transaction> {
        match kind {
            TransactionKind::Income => &self.incomes,
            TransactionKind::Expense => &self.expenses,
        }
    }

    fn matching<'a>(
        &'a self,
        query: &'a TransactionQuery,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        query
            .kinds()
            .into_iter()
            .flat_map(move |kind| self.collection(kind).iter())
            .filter(move |transaction| query.includes_date(&transaction.date))
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let collection = match builder.kind {
            TransactionKind::Income => &mut self.incomes,
            TransactionKind::Expense => &mut self.expenses,
        };
        let id = collection.len() as DatabaseId + 1;
        let transaction = builder.finalise(id);
        collection.push(transaction.clone());

        Ok(transaction)
    }

    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        Ok(self.matching(&query).cloned().collect())
    }

    fn total(&self, query: TransactionQuery) -> Result<f64, Error> {
        Ok(self
            .matching(&query)
            .map(|transaction| transaction.amount)
            .sum())
    }
}

#[cfg(test)]
mod memory_transaction_store_tests {
    use time::macros::datetime;

    use crate::{
        models::{CategoryName, Transaction, TransactionKind},
        stores::{TransactionQuery, TransactionStore},
    };

    use super::MemoryTransactionStore;

    #[test]
    fn matches_sqlite_ordering_and_range_rules() {
        let mut store = MemoryTransactionStore::new();
        let category = CategoryName::new_unchecked("Test");
        let expense = store
            .create(Transaction::build(
                TransactionKind::Expense,
                2.0,
                category.clone(),
                datetime!(2024-05-01 0:00),
            ))
            .unwrap();
        let income = store
            .create(Transaction::build(
                TransactionKind::Income,
                1.0,
                category.clone(),
                datetime!(2024-05-31 23:59),
            ))
            .unwrap();
        store
            .create(Transaction::build(
                TransactionKind::Income,
                4.0,
                category,
                datetime!(2024-06-01 0:00),
            ))
            .unwrap();
        let may = TransactionQuery::default()
            .within(datetime!(2024-05-01 0:00)..datetime!(2024-06-01 0:00));

        assert_eq!(store.get_query(may.clone()).unwrap(), vec![income, expense]);
        assert_eq!(store.total(may).unwrap(), 3.0);
        assert_eq!(
            store
                .total(TransactionQuery::kind(TransactionKind::Income))
                .unwrap(),
            5.0
        );
    }
}

//! This file defines the type `Transaction`, the core type of the budgeting part of the
//! application, and the parsing of user entered amounts.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{DatabaseId, Error, models::CategoryName};

/// Whether money was earned or spent.
///
/// Incomes and expenses are kept in separate collections, the kind decides
/// which one a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionKind {
    /// Both kinds in the order their records are listed.
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and hand the builder
/// to a [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, unique among transactions of the same kind.
    pub id: DatabaseId,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// The name of the category the transaction was filed under.
    pub category: CategoryName,
    /// The local date and time the transaction was recorded.
    pub date: PrimitiveDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionKind,
        amount: f64,
        category: CategoryName,
        date: PrimitiveDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            category,
            date,
        }
    }

    /// The amount with the sign of its effect on the balance, i.e. expenses
    /// are negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Stores call [TransactionBuilder::finalise] with the ID they assigned.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Which collection the transaction is stored in.
    pub kind: TransactionKind,
    /// The monetary amount of the transaction.
    ///
    /// The sign is not checked, an expense of `150.0` reduces the balance by `150.0`.
    pub amount: f64,
    /// The category name. Not checked against the category store.
    pub category: CategoryName,
    /// When the transaction happened, in local time.
    pub date: PrimitiveDateTime,
}

impl TransactionBuilder {
    /// Build the final [Transaction] instance with the store assigned `id`.
    pub fn finalise(self, id: DatabaseId) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// Parse a user entered amount.
///
/// Surrounding whitespace is ignored. The sign is not checked.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a number or is not finite
/// (e.g. "NaN" or "inf").
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

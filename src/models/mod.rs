//! This module defines the domain data types.

pub use category::{Category, CategoryName};
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, parse_amount};

mod category;
mod transaction;

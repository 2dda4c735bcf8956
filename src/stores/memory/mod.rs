//! In-memory stores.
//!
//! These behave like the SQLite stores but keep everything in a `Vec`, which
//! makes them useful for testing code that depends on the store traits.

mod category;
mod transaction;

pub use category::MemoryCategoryStore;
pub use transaction::MemoryTransactionStore;

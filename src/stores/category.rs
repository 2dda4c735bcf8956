//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName},
};

/// Creates, retrieves and deletes the categories transactions are filed under.
pub trait CategoryStore {
    /// Create a new category and add it the store.
    ///
    /// Names are not required to be unique.
    fn create(&mut self, name: CategoryName) -> Result<Category, Error>;

    /// Delete the oldest category called `name`.
    ///
    /// Returns `false` if there is no category with that name.
    fn delete_by_name(&mut self, name: &CategoryName) -> Result<bool, Error>;

    /// Get all categories in the order they were created.
    fn get_all(&self) -> Result<Vec<Category>, Error>;
}

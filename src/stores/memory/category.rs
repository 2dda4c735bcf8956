//! Implements an in-memory category store.

use crate::{
    DatabaseId, Error,
    models::{Category, CategoryName},
    stores::CategoryStore,
};

/// Keeps categories in a vector in the order they were created.
#[derive(Debug, Clone, Default)]
pub struct MemoryCategoryStore {
    categories: Vec<Category>,
    next_id: DatabaseId,
}

impl MemoryCategoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn create(&mut self, name: CategoryName) -> Result<Category, Error> {
        self.next_id += 1;
        let category = Category {
            id: self.next_id,
            name,
        };
        self.categories.push(category.clone());

        Ok(category)
    }

    fn delete_by_name(&mut self, name: &CategoryName) -> Result<bool, Error> {
        match self
            .categories
            .iter()
            .position(|category| &category.name == name)
        {
            Some(index) => {
                self.categories.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_all(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.clone())
    }
}

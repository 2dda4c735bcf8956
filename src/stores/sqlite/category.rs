//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName},
    stores::CategoryStore,
};

/// Creates, retrieves and deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&mut self, name: CategoryName) -> Result<Category, Error> {
        let connection = self.lock()?;
        connection.execute("INSERT INTO category (name) VALUES (?1);", (name.as_ref(),))?;

        let id = connection.last_insert_rowid();

        Ok(Category { id, name })
    }

    /// Delete the category called `name` with the lowest ID.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn delete_by_name(&mut self, name: &CategoryName) -> Result<bool, Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM category WHERE id = (
                SELECT id FROM category WHERE name = ?1 ORDER BY id ASC LIMIT 1
            );",
            (name.as_ref(),),
        )?;

        Ok(rows_affected > 0)
    }

    /// Retrieve categories in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.lock()?
            .prepare("SELECT id, name FROM category ORDER BY id ASC;")?
            .query_map([], SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        Ok(Self::ReturnType { id, name })
    }
}

#[cfg(test)]
mod category_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{db::initialize, models::CategoryName};

    use super::{CategoryStore, SQLiteCategoryStore};

    fn get_test_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        SQLiteCategoryStore::new(connection.clone())
    }

    fn names(store: &SQLiteCategoryStore) -> Vec<String> {
        store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|category| category.name.to_string())
            .collect()
    }

    #[test]
    fn create_category_succeeds() {
        let mut store = get_test_store();
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = store.create(name.clone()).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
    }

    #[test]
    fn get_all_categories_in_insertion_order() {
        let mut store = get_test_store();

        let inserted_categories = vec![
            store.create(CategoryName::new_unchecked("Foo")).unwrap(),
            store.create(CategoryName::new_unchecked("Bar")).unwrap(),
            store.create(CategoryName::new_unchecked("Baz")).unwrap(),
        ];

        let selected_categories = store.get_all().unwrap();

        assert_eq!(inserted_categories, selected_categories);
    }

    #[test]
    fn duplicate_names_are_kept() {
        let mut store = get_test_store();

        store.create(CategoryName::new_unchecked("Food")).unwrap();
        store.create(CategoryName::new_unchecked("Rent")).unwrap();
        store.create(CategoryName::new_unchecked("Food")).unwrap();

        assert_eq!(names(&store), vec!["Food", "Rent", "Food"]);
    }

    #[test]
    fn delete_by_name_removes_oldest_match_only() {
        let mut store = get_test_store();
        store.create(CategoryName::new_unchecked("Food")).unwrap();
        store.create(CategoryName::new_unchecked("Rent")).unwrap();
        let newer_food = store.create(CategoryName::new_unchecked("Food")).unwrap();

        let deleted = store
            .delete_by_name(&CategoryName::new_unchecked("Food"))
            .unwrap();

        assert!(deleted);
        let remaining = store.get_all().unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1], newer_food);
    }

    #[test]
    fn delete_missing_name_is_a_no_op() {
        let mut store = get_test_store();
        store.create(CategoryName::new_unchecked("Food")).unwrap();

        let deleted = store
            .delete_by_name(&CategoryName::new_unchecked("food"))
            .unwrap();

        assert!(!deleted);
        assert_eq!(names(&store), vec!["Food"]);
    }
}

//! In-memory book storage
//!
//! Every operation takes the one catalog lock for its whole
//! read-modify-write sequence, so operations are strictly serialized.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<Mutex<BTreeMap<i64, Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Each mutation is a single map call, so a panic elsewhere cannot leave
    // the map half-updated and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<i64, Book>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// List all books, ordered by id
    pub fn list(&self) -> Vec<Book> {
        self.lock().values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Get book by ID
    pub fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new book; the id must not be taken
    pub fn create(&self, book: Book) -> AppResult<Book> {
        let mut books = self.lock();
        if books.contains_key(&book.id) {
            return Err(AppError::Conflict(format!(
                "Book {} already exists",
                book.id
            )));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    /// Replace an existing book in full
    pub fn update(&self, book: Book) -> AppResult<Book> {
        let mut books = self.lock();
        match books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(book)
            }
            None => Err(not_found(book.id)),
        }
    }

    /// Delete book
    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

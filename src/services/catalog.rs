//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books.list()
    }

    pub fn count_books(&self) -> usize {
        self.repository.books.count()
    }

    pub fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id)
    }

    /// Create a new book under its caller-supplied id.
    /// The id is never generated server-side; an id already in the catalog is a conflict.
    pub fn create_book(&self, book: Book) -> AppResult<Book> {
        book.validate()?;

        let created = self.repository.books.create(book)?;
        tracing::info!(id = created.id, title = %created.title, "Book created");
        Ok(created)
    }

    /// Replace the book stored under `id` with `book` (full replacement, no merge)
    pub fn update_book(&self, id: i64, book: Book) -> AppResult<Book> {
        if book.id != id {
            return Err(AppError::BadRequest(format!(
                "Book id {} in body does not match id {} in path",
                book.id, id
            )));
        }
        book.validate()?;

        let updated = self.repository.books.update(book)?;
        tracing::info!(id = updated.id, "Book updated");
        Ok(updated)
    }

    pub fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id)?;
        tracing::info!(id, "Book deleted");
        Ok(())
    }
}

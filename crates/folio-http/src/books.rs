//! HTTP-backed book catalog.

use tracing::{debug, instrument};

use folio_core::{AccessToken, Book, BookDraft, BookId, BookPatch, Result};

use crate::client::HttpClient;
use crate::endpoints::{self, BOOKS};

/// The `/books` endpoints of the book API.
///
/// Every call is authenticated with the access token it is given; callers
/// obtain it from the session manager.
#[derive(Debug, Clone)]
pub struct HttpBooks {
    client: HttpClient,
}

impl HttpBooks {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn list(&self, token: &AccessToken) -> Result<Vec<Book>> {
        let books: Vec<Book> = self
            .client
            .get(BOOKS, token, "Failed to fetch books")
            .await?;
        debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    #[instrument(skip(self, token), fields(%id))]
    pub async fn get(&self, token: &AccessToken, id: &BookId) -> Result<Book> {
        let fallback = format!("Failed to fetch book with ID {}", id);
        self.client.get(&endpoints::book(id), token, &fallback).await
    }

    #[instrument(skip(self, token, draft), fields(title = %draft.title))]
    pub async fn create(&self, token: &AccessToken, draft: &BookDraft) -> Result<Book> {
        let book: Book = self
            .client
            .post(BOOKS, draft, Some(token), "Failed to create book")
            .await?;
        debug!(id = %book.id, "Created book");
        Ok(book)
    }

    /// Send only the fields present in `patch`.
    #[instrument(skip(self, token, patch), fields(%id))]
    pub async fn update(&self, token: &AccessToken, id: &BookId, patch: &BookPatch) -> Result<Book> {
        let fallback = format!("Failed to update book with ID {}", id);
        self.client
            .patch(&endpoints::book(id), patch, token, &fallback)
            .await
    }

    /// Delete a book. The server answers with the deleted record.
    #[instrument(skip(self, token), fields(%id))]
    pub async fn delete(&self, token: &AccessToken, id: &BookId) -> Result<Book> {
        let fallback = format!("Failed to delete book with ID {}", id);
        self.client
            .delete(&endpoints::book(id), token, &fallback)
            .await
    }
}

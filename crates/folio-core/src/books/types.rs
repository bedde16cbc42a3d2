//! Book, draft and patch types.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};
use crate::types::BookId;

/// Oldest publication year accepted by the catalog.
pub const EARLIEST_PUBLICATION_YEAR: i32 = 1000;

/// A book as stored in the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted when adding a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
}

impl BookDraft {
    /// Validate against the current calendar year.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_for_year(Utc::now().year())
    }

    /// Validate with an explicit upper bound on the publication year.
    pub fn validate_for_year(&self, current_year: i32) -> Result<(), Error> {
        require("Title", &self.title)?;
        require("Author", &self.author)?;
        require("Genre", &self.genre)?;
        check_year(self.publication_year, current_year)
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            publication_year: book.publication_year,
        }
    }
}

/// A partial update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.publication_year.is_none()
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.validate_for_year(Utc::now().year())
    }

    /// Validate only the fields that are present.
    pub fn validate_for_year(&self, current_year: i32) -> Result<(), Error> {
        if self.is_empty() {
            return Err(book_error("Nothing to update".to_string()));
        }
        if let Some(title) = &self.title {
            require("Title", title)?;
        }
        if let Some(author) = &self.author {
            require("Author", author)?;
        }
        if let Some(genre) = &self.genre {
            require("Genre", genre)?;
        }
        if let Some(year) = self.publication_year {
            check_year(year, current_year)?;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(book_error(format!("{} is required", field)));
    }
    Ok(())
}

fn check_year(year: i32, current_year: i32) -> Result<(), Error> {
    if !(EARLIEST_PUBLICATION_YEAR..=current_year).contains(&year) {
        return Err(book_error(format!(
            "Publication year must be between {} and {}",
            EARLIEST_PUBLICATION_YEAR, current_year
        )));
    }
    Ok(())
}

fn book_error(message: String) -> Error {
    InvalidInputError::Book { message }.into()
}

//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use folio_core::Book;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one book as a single summary line.
pub fn book_line(book: &Book) {
    println!(
        "{}  {} by {} ({}) {}",
        book.id.as_str().dimmed(),
        book.title.bold(),
        book.author,
        book.publication_year,
        format!("[{}]", book.genre).dimmed()
    );
}

/// Print every field of a book.
pub fn book_details(book: &Book) {
    field("ID", book.id.as_str());
    field("Title", &book.title);
    field("Author", &book.author);
    field("Genre", &book.genre);
    field("Published", &book.publication_year.to_string());
    field("Added", &book.created_at.to_rfc3339());
    field("Updated", &book.updated_at.to_rfc3339());
}

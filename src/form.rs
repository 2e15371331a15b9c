use std::collections::BTreeSet;
use std::convert::TryFrom;

use thiserror::Error;

use crate::models::{Book, NewBook, FALLBACK_THUMBNAIL};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldError {
    #[error("Title is required")]
    TitleRequired,
    #[error("At least one author is required")]
    AuthorsRequired,
    #[error("Page count must be a whole number")]
    PageCountNotNumber,
    #[error("Page count must be at least 1")]
    PageCountTooSmall,
}

/// Raw text of the edit form. Authors are comma separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub authors: String,
    pub published_year: String,
    pub description: String,
    pub publisher: String,
    pub page_count: String,
    pub isbn: String,
    pub thumbnail: String,
}

fn split_authors(authors: &str) -> Vec<String> {
    authors
        .split(',')
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(String::from)
        .collect()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl BookForm {
    pub fn from_book(book: &Book) -> BookForm {
        let mut form = BookForm::default();
        form.fill(book);
        form
    }

    /// Overwrites every field with the book's values.
    pub fn fill(&mut self, book: &Book) {
        self.title = book.title.clone();
        self.authors = book.authors.join(", ");
        self.published_year = book.published_year.clone();
        self.description = book.description.clone();
        self.publisher = book.publisher.clone().unwrap_or_default();
        self.page_count = book.page_count.map(|n| n.to_string()).unwrap_or_default();
        self.isbn = book.isbn.clone().unwrap_or_default();
        self.thumbnail = book.thumbnail.clone();
    }

    fn parse_page_count(&self) -> Result<Option<u32>, FieldError> {
        let page_count = self.page_count.trim();
        if page_count.is_empty() {
            return Ok(None);
        }

        let n = page_count
            .parse::<i64>()
            .map_err(|_| FieldError::PageCountNotNumber)?;

        if n < 1 {
            return Err(FieldError::PageCountTooSmall);
        }

        u32::try_from(n)
            .map(Some)
            .map_err(|_| FieldError::PageCountNotNumber)
    }

    pub fn validate(&self) -> BTreeSet<FieldError> {
        let mut errors = BTreeSet::new();

        if self.title.trim().is_empty() {
            errors.insert(FieldError::TitleRequired);
        }
        if split_authors(&self.authors).is_empty() {
            errors.insert(FieldError::AuthorsRequired);
        }
        if let Err(err) = self.parse_page_count() {
            errors.insert(err);
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn to_new_book(&self) -> Result<NewBook, BTreeSet<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let page_count = self.parse_page_count().map_err(|err| {
            let mut errors = BTreeSet::new();
            errors.insert(err);
            errors
        })?;

        let thumbnail = optional(&self.thumbnail).unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());

        Ok(NewBook {
            title: self.title.trim().to_string(),
            authors: split_authors(&self.authors),
            published_year: self.published_year.trim().to_string(),
            description: self.description.trim().to_string(),
            thumbnail,
            isbn: optional(&self.isbn),
            page_count,
            publisher: optional(&self.publisher),
        })
    }
}

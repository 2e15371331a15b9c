pub const FALLBACK_THUMBNAIL: &str = "/assets/fallback-book-img.jpg";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published_year: String,
    pub description: String,
    pub thumbnail: String,
    pub isbn: Option<String>,
    pub page_count: Option<u32>,
    pub publisher: Option<String>,
}

/// A book record before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub authors: Vec<String>,
    pub published_year: String,
    pub description: String,
    pub thumbnail: String,
    pub isbn: Option<String>,
    pub page_count: Option<u32>,
    pub publisher: Option<String>,
}

/// Partial update merged into an existing record.
///
/// `None` leaves a field untouched. The optional fields are doubly wrapped so
/// that `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_year: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub isbn: Option<Option<String>>,
    pub page_count: Option<Option<u32>>,
    pub publisher: Option<Option<String>>,
}

impl Book {
    pub fn new(id: String, book: NewBook) -> Book {
        Book {
            id,
            title: book.title,
            authors: book.authors,
            published_year: book.published_year,
            description: book.description,
            thumbnail: book.thumbnail,
            isbn: book.isbn,
            page_count: book.page_count,
            publisher: book.publisher,
        }
    }

    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(authors) = patch.authors {
            self.authors = authors;
        }
        if let Some(published_year) = patch.published_year {
            self.published_year = published_year;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(isbn) = patch.isbn {
            self.isbn = isbn;
        }
        if let Some(page_count) = patch.page_count {
            self.page_count = page_count;
        }
        if let Some(publisher) = patch.publisher {
            self.publisher = publisher;
        }
    }

    /// `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self
                .authors
                .iter()
                .any(|author| author.to_lowercase().contains(term))
            || self.description.to_lowercase().contains(term)
            || self
                .publisher
                .as_ref()
                .map_or(false, |publisher| publisher.to_lowercase().contains(term))
    }

    pub fn authors_display(&self) -> String {
        authors_display(&self.authors)
    }

    pub fn thumbnail_or_fallback(&self) -> &str {
        if self.thumbnail.trim().is_empty() {
            FALLBACK_THUMBNAIL
        } else {
            &self.thumbnail
        }
    }

    /// Called when the thumbnail could not be loaded.
    pub fn on_image_error(&mut self) {
        self.thumbnail = FALLBACK_THUMBNAIL.to_string();
    }
}

impl From<NewBook> for BookPatch {
    fn from(book: NewBook) -> Self {
        BookPatch {
            title: Some(book.title),
            authors: Some(book.authors),
            published_year: Some(book.published_year),
            description: Some(book.description),
            thumbnail: Some(book.thumbnail),
            isbn: Some(book.isbn),
            page_count: Some(book.page_count),
            publisher: Some(book.publisher),
        }
    }
}

impl BookPatch {
    pub fn title(title: impl Into<String>) -> BookPatch {
        BookPatch {
            title: Some(title.into()),
            ..BookPatch::default()
        }
    }
}

/// "A", "A & B", or "A & 2 others".
pub fn authors_display(authors: &[String]) -> String {
    match authors {
        [] => UNKNOWN_AUTHOR.to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} & {}", first, second),
        [first, rest @ ..] => format!("{} & {} others", first, rest.len()),
    }
}

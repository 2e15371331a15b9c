use anyhow;

use crate::models::Book;

mod google_books;

pub use google_books::GoogleBooks;

/// Third-party book metadata lookup.
pub trait BookSource {
    fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Book>>;
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;

    use super::BookSource;
    use crate::models::{Book, NewBook};

    pub fn book(id: &str, title: &str, authors: &[&str]) -> Book {
        Book::new(
            id.to_string(),
            NewBook {
                title: title.to_string(),
                authors: authors.iter().map(|a| a.to_string()).collect(),
                ..NewBook::default()
            },
        )
    }

    /// Answers every query with the same books, or fails every call.
    #[derive(Default)]
    pub struct FakeSource {
        pub books: Vec<Book>,
        pub fail: bool,
        pub calls: RefCell<Vec<(String, usize)>>,
    }

    impl FakeSource {
        pub fn with_books(books: Vec<Book>) -> FakeSource {
            FakeSource {
                books,
                ..FakeSource::default()
            }
        }

        pub fn failing() -> FakeSource {
            FakeSource {
                fail: true,
                ..FakeSource::default()
            }
        }
    }

    impl BookSource for FakeSource {
        fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Book>> {
            self.calls
                .borrow_mut()
                .push((query.to_string(), max_results));

            if self.fail {
                return Err(anyhow::Error::msg("connection refused"));
            }

            Ok(self.books.iter().take(max_results).cloned().collect())
        }
    }
}

use log::{debug, warn};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::change::{self, Change};
use crate::config::Config;
use crate::models::{Book, BookPatch, NewBook};
use crate::source::BookSource;

pub const LOCAL_ID_PREFIX: &str = "local_";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Book not found: {0}")]
    NotFound(String),
    #[error("Invalid book: {0}")]
    Invalid(&'static str),
}

/// Title non-empty, page count at least 1 when present.
fn check(book: &Book) -> Result<(), StoreError> {
    if book.title.trim().is_empty() {
        return Err(StoreError::Invalid("title is empty"));
    }
    if book.page_count == Some(0) {
        return Err(StoreError::Invalid("page count must be at least 1"));
    }

    Ok(())
}

/// State handed to listeners after every change.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// The filtered view.
    pub books: &'a [Book],
    pub all_books: &'a [Book],
    pub loading: bool,
}

pub type Listener = Box<dyn FnMut(&Snapshot<'_>, &Change)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(usize);

/// The full collection plus the view filtered by the last search.
pub struct BookStore {
    all: Vec<Book>,
    filtered: Vec<Book>,
    loading: bool,
    seed_query: String,
    seed_max_results: usize,
    search_max_results: usize,
    listeners: Vec<(ListenerHandle, Listener)>,
    next_listener: usize,
}

impl Default for BookStore {
    fn default() -> Self {
        BookStore::new(&Config::default())
    }
}

impl BookStore {
    pub fn new(config: &Config) -> BookStore {
        BookStore {
            all: vec![],
            filtered: vec![],
            loading: false,
            seed_query: config.seed_query.clone(),
            seed_max_results: config.seed_max_results,
            search_max_results: config.search_max_results,
            listeners: vec![],
            next_listener: 0,
        }
    }

    pub fn with_books(config: &Config, books: Vec<Book>) -> BookStore {
        let mut store = BookStore::new(config);
        store.filtered = books.clone();
        store.all = books;
        store
    }

    /// The filtered view.
    pub fn books(&self) -> &[Book] {
        &self.filtered
    }

    pub fn all_books(&self) -> &[Book] {
        &self.all
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            books: &self.filtered,
            all_books: &self.all,
            loading: self.loading,
        }
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerHandle {
        let handle = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, listener));
        handle
    }

    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    fn publish(&mut self, change: Change) {
        change::update(&change);

        let snapshot = Snapshot {
            books: &self.filtered,
            all_books: &self.all,
            loading: self.loading,
        };

        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot, &change);
        }
    }

    /// Replaces the collection with the seed query's results. A failing
    /// source leaves the collection empty.
    pub fn load_initial<S: BookSource + ?Sized>(&mut self, source: &S) {
        self.loading = true;
        self.publish(Change::Loading);

        let change = match source.search(&self.seed_query, self.seed_max_results) {
            Ok(books) => {
                self.all = books;
                Change::Loaded(self.all.len())
            }
            Err(err) => {
                self.all = vec![];
                Change::LoadFailed(format!("{:#}", err))
            }
        };

        self.filtered = self.all.clone();
        self.loading = false;
        self.publish(change);
    }

    /// Case-insensitive substring match over title, authors, description and
    /// publisher. A blank query restores the full collection.
    pub fn search(&mut self, query: &str) {
        let query = query.trim();

        if query.is_empty() {
            self.filtered = self.all.clone();
        } else {
            let term = query.to_lowercase();
            self.filtered = self
                .all
                .iter()
                .filter(|book| book.matches(&term))
                .cloned()
                .collect();
        }

        debug!("search {:?} matched {}", query, self.filtered.len());
        self.publish(Change::Searched(query.to_string()));
    }

    pub fn clear_search(&mut self) {
        self.filtered = self.all.clone();
        self.publish(Change::SearchCleared);
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Book> {
        self.all.iter().find(|book| book.id == id)
    }

    pub fn add(&mut self, book: NewBook) -> Result<String, StoreError> {
        let id = self.generate_id();
        let book = Book::new(id.clone(), book);
        check(&book)?;

        self.filtered.push(book.clone());
        self.all.push(book);

        self.publish(Change::Added(id.clone()));
        Ok(id)
    }

    pub fn update(&mut self, id: &str, patch: BookPatch) -> Result<(), StoreError> {
        let book = self
            .all
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut updated = book.clone();
        updated.apply(patch);
        check(&updated)?;
        *book = updated.clone();

        if let Some(filtered) = self.filtered.iter_mut().find(|book| book.id == id) {
            *filtered = updated;
        }

        self.publish(Change::Updated(id.to_string()));
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.all.len();
        self.all.retain(|book| book.id != id);

        if self.all.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.filtered.retain(|book| book.id != id);

        self.publish(Change::Deleted(id.to_string()));
        Ok(())
    }

    /// Failures propagate; see `search_external` for the swallowing variant.
    pub fn try_search_external<S: BookSource + ?Sized>(
        &self,
        source: &S,
        query: &str,
    ) -> anyhow::Result<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }

        source.search(query, self.search_max_results)
    }

    pub fn search_external<S: BookSource + ?Sized>(&self, source: &S, query: &str) -> Vec<Book> {
        self.try_search_external(source, query)
            .unwrap_or_else(|err| {
                warn!("external search {:?} failed: {:#}", query, err);
                vec![]
            })
    }

    fn generate_id(&self) -> String {
        loop {
            let id = local_id();
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }
}

/// `local_<unix millis>_<9 base-36 chars>`
pub fn local_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    let mut n = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        let digit = (n % 36) as u32;
        n /= 36;
        suffix.push(std::char::from_digit(digit, 36).unwrap_or('0'));
    }

    format!("{}{}_{}", LOCAL_ID_PREFIX, millis, suffix)
}

//! Rate-limited search input.
//!
//! The adapters never read the clock themselves; the caller's event loop
//! passes `now` in on every keystroke and timer tick.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::models::Book;
use crate::source::BookSource;
use crate::store::BookStore;

pub const EXTERNAL_SEARCH_FAILED: &str = "Failed to search Google Books. Please try again.";

/// Leading-edge fixed-interval gate.
///
/// The first value opens a window of `interval`; anything arriving while the
/// window is open is dropped. Values equal to the previous emission are
/// suppressed.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    window_start: Option<Instant>,
    last: Option<String>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Throttle {
        Throttle {
            interval,
            window_start: None,
            last: None,
        }
    }

    pub fn push(&mut self, value: &str, now: Instant) -> Option<String> {
        if let Some(start) = self.window_start {
            if now.saturating_duration_since(start) < self.interval {
                return None;
            }
        }

        self.window_start = Some(now);

        if self.last.as_deref() == Some(value) {
            return None;
        }

        self.last = Some(value.to_string());
        Some(value.to_string())
    }

    /// Forgets the previous emission so the same value can pass again.
    pub fn forget(&mut self) {
        self.last = None;
    }
}

/// Quiet-period gate.
///
/// Each value replaces the pending one and restarts the timer. `poll` hands
/// the pending value out once `interval` has passed without new input.
#[derive(Debug)]
pub struct Debounce {
    interval: Duration,
    pending: Option<(String, Instant)>,
    last: Option<String>,
}

impl Debounce {
    pub fn new(interval: Duration) -> Debounce {
        Debounce {
            interval,
            pending: None,
            last: None,
        }
    }

    pub fn push(&mut self, value: &str, now: Instant) {
        self.pending = Some((value.to_string(), now + self.interval));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => {}
            _ => return None,
        }

        let (value, _) = self.pending.take()?;

        if self.last.as_ref() == Some(&value) {
            return None;
        }

        self.last = Some(value.clone());
        Some(value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn forget(&mut self) {
        self.last = None;
    }
}

/// Throttled local search over the store.
#[derive(Debug)]
pub struct ListSearch {
    throttle: Throttle,
    query: String,
}

impl ListSearch {
    pub fn new(interval: Duration) -> ListSearch {
        ListSearch {
            throttle: Throttle::new(interval),
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns whether a search ran.
    pub fn input(&mut self, raw: &str, now: Instant, store: &mut BookStore) -> bool {
        self.query = raw.to_string();

        match self.throttle.push(raw.trim(), now) {
            Some(query) => {
                store.search(&query);
                true
            }
            None => false,
        }
    }

    /// Search button; bypasses the throttle.
    pub fn submit(&mut self, store: &mut BookStore) {
        store.search(self.query.trim());
    }

    pub fn clear(&mut self, store: &mut BookStore) {
        self.query.clear();
        self.throttle.forget();
        store.clear_search();
    }
}

/// Ticket for one external request. Only the latest ticket may apply its
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Debounced lookup against the external source, used to pre-fill the form.
#[derive(Debug)]
pub struct ExternalSearch {
    debounce: Debounce,
    query: String,
    results: Vec<Book>,
    loading: bool,
    error: Option<String>,
    visible: bool,
    issued: u64,
}

impl ExternalSearch {
    pub fn new(interval: Duration) -> ExternalSearch {
        ExternalSearch {
            debounce: Debounce::new(interval),
            query: String::new(),
            results: vec![],
            loading: false,
            error: None,
            visible: false,
            issued: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Book] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.next_deadline()
    }

    /// Shows or hides the panel. Hiding drops results, query and any pending
    /// input.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;

        if !self.visible {
            self.reset();
        }
    }

    pub fn input(&mut self, raw: &str, now: Instant) {
        self.query = raw.to_string();
        self.debounce.push(raw.trim(), now);
    }

    /// Timer tick. Returns whether a request was dispatched.
    pub fn poll<S: BookSource + ?Sized>(
        &mut self,
        now: Instant,
        store: &BookStore,
        source: &S,
    ) -> bool {
        match self.debounce.poll(now) {
            Some(query) => self.run(&query, store, source),
            None => false,
        }
    }

    /// Search button; bypasses the debounce.
    pub fn submit<S: BookSource + ?Sized>(&mut self, store: &BookStore, source: &S) -> bool {
        let query = self.query.trim().to_string();
        self.run(&query, store, source)
    }

    fn run<S: BookSource + ?Sized>(&mut self, query: &str, store: &BookStore, source: &S) -> bool {
        if query.is_empty() {
            return false;
        }

        let ticket = self.begin();
        let outcome = store.try_search_external(source, query);
        self.finish(ticket, outcome)
    }

    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        Ticket(self.issued)
    }

    /// Applies a response unless a newer request has been issued since.
    pub fn finish(&mut self, ticket: Ticket, outcome: anyhow::Result<Vec<Book>>) -> bool {
        if ticket.0 != self.issued {
            debug!("dropping stale response {} (latest {})", ticket.0, self.issued);
            return false;
        }

        self.loading = false;

        match outcome {
            Ok(books) => self.results = books,
            Err(err) => {
                warn!("external search failed: {:#}", err);
                self.results.clear();
                self.error = Some(EXTERNAL_SEARCH_FAILED.to_string());
            }
        }

        true
    }

    /// Takes a result for the form and closes the panel.
    pub fn select(&mut self, index: usize) -> Option<Book> {
        if index >= self.results.len() {
            return None;
        }

        let book = self.results.swap_remove(index);
        self.visible = false;
        self.reset();
        Some(book)
    }

    fn reset(&mut self) {
        self.results.clear();
        self.query.clear();
        self.debounce.cancel();
        self.debounce.forget();
    }
}

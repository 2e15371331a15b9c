extern crate book_catalog;

use std::env;

use anyhow;
use log::debug;

use crate::book_catalog::change::Change;
use crate::book_catalog::store::Snapshot;
use crate::book_catalog::{BookStore, Config, GoogleBooks};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let source = GoogleBooks::new(&config)?;

    let mut store = BookStore::new(&config);
    store.subscribe(Box::new(|snapshot: &Snapshot<'_>, change: &Change| {
        debug!(
            "{}: showing {} of {}",
            change,
            snapshot.books.len(),
            snapshot.all_books.len()
        );
    }));

    store.load_initial(&source);

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    store.search(&query);

    for book in store.books() {
        println!(
            "{}  {} by {} ({})",
            book.id,
            book.title,
            book.authors_display(),
            book.published_year
        );
    }

    Ok(())
}

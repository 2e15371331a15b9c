pub mod change;
pub mod config;
pub mod form;
pub mod models;
pub mod route;
pub mod search;
pub mod source;
pub mod store;
pub mod workflow;

pub use config::Config;
pub use models::{Book, BookPatch, NewBook};
pub use source::{BookSource, GoogleBooks};
pub use store::{BookStore, StoreError};

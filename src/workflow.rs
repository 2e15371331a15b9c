use std::collections::BTreeSet;

use log::{debug, info};
use thiserror::Error;

use crate::config::Config;
use crate::form::{BookForm, FieldError};
use crate::models::{Book, BookPatch};
use crate::route::ADD_TOKEN;
use crate::search::ExternalSearch;
use crate::store::{BookStore, StoreError};

pub const NOT_FOUND: &str = "Book not found";
pub const INVALID_FORM: &str = "Please fix the errors in the form";
pub const ADD_FAILED: &str = "Failed to add book";
pub const UPDATE_FAILED: &str = "Failed to update book";
pub const DELETE_FAILED: &str = "Failed to delete book";

/// Where the detail view is. `Exited` means navigate back to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Viewing,
    Editing { is_new: bool },
    Saving,
    ConfirmingDelete,
    NotFound,
    Exited,
}

#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    #[error("can't {action} while {state:?}")]
    InvalidTransition { state: State, action: &'static str },
    #[error("{}", INVALID_FORM)]
    Invalid(BTreeSet<FieldError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// View, edit, add and delete a single record.
#[derive(Debug)]
pub struct Detail {
    state: State,
    book: Option<Book>,
    form: BookForm,
    error: Option<String>,
    external: ExternalSearch,
}

impl Detail {
    /// `target` is a book id or `add`.
    pub fn open(target: &str, store: &BookStore, config: &Config) -> Detail {
        let mut detail = Detail {
            state: State::Exited,
            book: None,
            form: BookForm::default(),
            error: None,
            external: ExternalSearch::new(config.search_interval),
        };

        let target = target.trim();

        if target == ADD_TOKEN {
            detail.state = State::Editing { is_new: true };
        } else if target.is_empty() {
            debug!("no target, back to list");
        } else {
            match store.get_by_id(target) {
                Some(book) => {
                    detail.form = BookForm::from_book(book);
                    detail.book = Some(book.clone());
                    detail.state = State::Viewing;
                }
                None => {
                    detail.error = Some(NOT_FOUND.to_string());
                    detail.state = State::NotFound;
                }
            }
        }

        detail
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// Field edits; validity is recomputed on demand.
    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn field_errors(&self) -> BTreeSet<FieldError> {
        self.form.validate()
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn external(&self) -> &ExternalSearch {
        &self.external
    }

    pub fn external_mut(&mut self) -> &mut ExternalSearch {
        &mut self.external
    }

    fn transition(&mut self, to: State) {
        debug!("{:?} -> {:?}", self.state, to);
        self.state = to;
    }

    fn invalid(&self, action: &'static str) -> WorkflowError {
        WorkflowError::InvalidTransition {
            state: self.state.clone(),
            action,
        }
    }

    pub fn edit(&mut self) -> Result<(), WorkflowError> {
        if self.state != State::Viewing {
            return Err(self.invalid("edit"));
        }

        self.error = None;
        self.transition(State::Editing { is_new: false });
        Ok(())
    }

    /// Existing records go back to viewing with the form reset; new ones
    /// leave the workflow.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            State::Editing { is_new: true } => {
                self.transition(State::Exited);
            }
            State::Editing { is_new: false } => {
                if let Some(book) = self.book.as_ref() {
                    self.form.fill(book);
                }
                self.error = None;
                self.transition(State::Viewing);
            }
            _ => return Err(self.invalid("cancel")),
        }

        Ok(())
    }

    pub fn save(&mut self, store: &mut BookStore) -> Result<(), WorkflowError> {
        let is_new = match self.state {
            State::Editing { is_new } => is_new,
            _ => return Err(self.invalid("save")),
        };

        let new_book = match self.form.to_new_book() {
            Ok(new_book) => new_book,
            Err(errors) => {
                self.error = Some(INVALID_FORM.to_string());
                return Err(WorkflowError::Invalid(errors));
            }
        };

        self.error = None;
        self.transition(State::Saving);

        if is_new {
            return match store.add(new_book) {
                Ok(id) => {
                    info!("saved new book {}", id);
                    self.transition(State::Exited);
                    Ok(())
                }
                Err(err) => {
                    self.error = Some(ADD_FAILED.to_string());
                    self.transition(State::Editing { is_new });
                    Err(err.into())
                }
            };
        }

        let id = match self.book.as_ref() {
            Some(book) => book.id.clone(),
            None => {
                self.transition(State::Editing { is_new });
                return Err(self.invalid("save"));
            }
        };

        match store.update(&id, BookPatch::from(new_book)) {
            Ok(()) => {
                self.book = store.get_by_id(&id).cloned();
                self.transition(State::Viewing);
                Ok(())
            }
            Err(err) => {
                self.error = Some(UPDATE_FAILED.to_string());
                self.transition(State::Editing { is_new });
                Err(err.into())
            }
        }
    }

    pub fn request_delete(&mut self) -> Result<(), WorkflowError> {
        if self.state != State::Viewing || self.book.is_none() {
            return Err(self.invalid("request delete"));
        }

        self.transition(State::ConfirmingDelete);
        Ok(())
    }

    pub fn cancel_delete(&mut self) -> Result<(), WorkflowError> {
        if self.state != State::ConfirmingDelete {
            return Err(self.invalid("cancel delete"));
        }

        self.transition(State::Viewing);
        Ok(())
    }

    pub fn confirm_delete(&mut self, store: &mut BookStore) -> Result<(), WorkflowError> {
        if self.state != State::ConfirmingDelete {
            return Err(self.invalid("confirm delete"));
        }

        let id = self
            .book
            .as_ref()
            .map(|book| book.id.clone())
            .unwrap_or_default();

        match store.delete(&id) {
            Ok(()) => {
                self.transition(State::Exited);
                Ok(())
            }
            Err(err) => {
                self.error = Some(DELETE_FAILED.to_string());
                self.transition(State::Viewing);
                Err(err.into())
            }
        }
    }

    pub fn go_back(&mut self) {
        self.transition(State::Exited);
    }

    /// Copies an external search result into the form.
    pub fn select_external(&mut self, index: usize) -> Result<(), WorkflowError> {
        if !matches!(self.state, State::Editing { .. }) {
            return Err(self.invalid("select a search result"));
        }

        if let Some(book) = self.external.select(index) {
            self.form.fill(&book);
        }

        Ok(())
    }
}

use std::fmt;

pub const ADD_TOKEN: &str = "add";

/// Addressable views. Anything unrecognised lands on the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Detail(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        match segments.as_slice() {
            ["books", ADD_TOKEN] => Route::Add,
            ["books", id] => Route::Detail(id.to_string()),
            _ => Route::List,
        }
    }

    /// Target handed to the detail workflow, if this is a detail view.
    pub fn target(&self) -> Option<&str> {
        match self {
            Route::List => None,
            Route::Add => Some(ADD_TOKEN),
            Route::Detail(id) => Some(id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/books"),
            Route::Add => write!(f, "/books/{}", ADD_TOKEN),
            Route::Detail(id) => write!(f, "/books/{}", id),
        }
    }
}

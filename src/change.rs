use std::fmt;

use log::{info, warn};

pub fn update(change: &Change) {
    match change {
        Change::LoadFailed(err) => warn!("{}: {}", change, err),
        other => info!("{}", other),
    }
}

/// What caused the store to publish a new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Loading,
    Loaded(usize),
    LoadFailed(String),
    Searched(String),
    SearchCleared,
    Added(String),
    Updated(String),
    Deleted(String),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading"),
            Self::Loaded(count) => write!(f, "Loaded {} books", count),
            Self::LoadFailed(_) => write!(f, "Load Failed"),
            Self::Searched(query) => write!(f, "Searched {:?}", query),
            Self::SearchCleared => write!(f, "Search Cleared"),
            Self::Added(id) => write!(f, "Added {}", id),
            Self::Updated(id) => write!(f, "Updated {}", id),
            Self::Deleted(id) => write!(f, "Deleted {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Change;

    #[test]
    fn display() -> anyhow::Result<()> {
        assert_eq!("Loaded 3 books", Change::Loaded(3).to_string());
        assert_eq!("Searched \"rust\"", Change::Searched(String::from("rust")).to_string());
        assert_eq!("Deleted local_1", Change::Deleted(String::from("local_1")).to_string());

        Ok(())
    }
}

use std::env;
use std::time::Duration;

use anyhow::Context;

pub const API_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const SEED_QUERY: &str = "title:motivation OR javascript OR angular";

pub const API_URL_VAR: &str = "BOOK_CATALOG_API_URL";
pub const SEARCH_INTERVAL_VAR: &str = "BOOK_CATALOG_SEARCH_INTERVAL_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub seed_query: String,
    pub seed_max_results: usize,
    pub search_max_results: usize,
    pub print_type: String,
    /// Shared by the throttled list search and the debounced external search.
    pub search_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: API_URL.to_string(),
            seed_query: SEED_QUERY.to_string(),
            seed_max_results: 40,
            search_max_results: 10,
            print_type: String::from("books"),
            search_interval: Duration::from_millis(300),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let mut config = Config::default();

        if let Some(api_url) = var(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_url = api_url.trim().to_string();
        }

        if let Some(ms) = var(SEARCH_INTERVAL_VAR) {
            let ms = ms
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of milliseconds", SEARCH_INTERVAL_VAR))?;
            config.search_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{Config, API_URL, API_URL_VAR, SEARCH_INTERVAL_VAR};

    #[test]
    fn from_vars_defaults() -> anyhow::Result<()> {
        let config = Config::from_vars(|_| None)?;

        assert_eq!(Config::default(), config);
        assert_eq!(API_URL, config.api_url);
        assert_eq!(40, config.seed_max_results);
        assert_eq!(10, config.search_max_results);
        assert_eq!(Duration::from_millis(300), config.search_interval);

        Ok(())
    }

    #[test]
    fn from_vars_overrides() -> anyhow::Result<()> {
        let mut vars = HashMap::new();
        vars.insert(API_URL_VAR, "http://localhost:8080/volumes");
        vars.insert(SEARCH_INTERVAL_VAR, "50");

        let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()))?;

        assert_eq!("http://localhost:8080/volumes", config.api_url);
        assert_eq!(Duration::from_millis(50), config.search_interval);

        Ok(())
    }

    #[test]
    fn from_vars_bad_interval() -> anyhow::Result<()> {
        let r = Config::from_vars(|key| {
            if key == SEARCH_INTERVAL_VAR {
                Some(String::from("soon"))
            } else {
                None
            }
        });

        assert_eq!(true, r.is_err());

        Ok(())
    }
}

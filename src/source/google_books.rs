use anyhow;
use log::{debug, trace};
use reqwest;
use reqwest::Url;

use super::BookSource;
use crate::config::Config;
use crate::models::{Book, VolumesResponse};

/// # Google Books
/// `GET {api_url}?q={query}&maxResults={n}&printType=books`
pub struct GoogleBooks {
    api_url: String,
    print_type: String,
    client: reqwest::blocking::Client,
}

impl GoogleBooks {
    pub fn new(config: &Config) -> anyhow::Result<GoogleBooks> {
        let client = reqwest::blocking::Client::builder().build()?;

        Ok(GoogleBooks {
            api_url: config.api_url.clone(),
            print_type: config.print_type.clone(),
            client,
        })
    }

    pub fn url(&self, query: &str, max_results: usize) -> anyhow::Result<Url> {
        let max_results = max_results.to_string();

        let url = Url::parse_with_params(
            &self.api_url,
            &[
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("printType", self.print_type.as_str()),
            ],
        )?;

        Ok(url)
    }

    pub fn request(&self, url: Url) -> anyhow::Result<String> {
        trace!("GoogleBooks::request()");
        debug!("url = {}", url);

        let rd = self.client.get(url).send()?.error_for_status()?.text()?;

        debug!("response bytes = {}", rd.len());

        Ok(rd)
    }

    pub fn parse(&self, request_data: &str) -> anyhow::Result<Vec<Book>> {
        trace!("GoogleBooks::parse()");
        let response = serde_json::from_str::<VolumesResponse>(request_data)?;

        debug!("total_items = {}", response.total_items);

        Ok(response.into_books())
    }
}

impl BookSource for GoogleBooks {
    fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Book>> {
        trace!("GoogleBooks::search()");
        let url = self.url(query, max_results)?;
        let rd = self.request(url)?;

        self.parse(&rd)
    }
}

#[cfg(test)]
mod tests {
    use super::GoogleBooks;
    use crate::config::Config;

    #[test]
    fn url() -> anyhow::Result<()> {
        let google_books = GoogleBooks::new(&Config::default())?;

        let url = google_books.url("title:motivation OR javascript", 40)?;

        let pairs = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect::<Vec<_>>();

        let expected = vec![
            (String::from("q"), String::from("title:motivation OR javascript")),
            (String::from("maxResults"), String::from("40")),
            (String::from("printType"), String::from("books")),
        ];

        assert_eq!(expected, pairs);
        assert_eq!("www.googleapis.com", url.host_str().unwrap_or_default());
        assert_eq!("/books/v1/volumes", url.path());

        Ok(())
    }

    #[test]
    fn url_bad_base() -> anyhow::Result<()> {
        let config = Config {
            api_url: String::from("not a url"),
            ..Config::default()
        };
        let google_books = GoogleBooks::new(&config)?;

        assert_eq!(true, google_books.url("rust", 10).is_err());

        Ok(())
    }

    #[test]
    fn parse() -> anyhow::Result<()> {
        let google_books = GoogleBooks::new(&Config::default())?;

        let rd = r#"{
            "totalItems": 2,
            "items": [
                { "id": "x1", "volumeInfo": { "title": "Eloquent JavaScript", "authors": ["Marijn Haverbeke"] } },
                { "id": "x2", "volumeInfo": { "subtitle": "no title here" } }
            ]
        }"#;

        let pd = google_books.parse(rd)?;

        assert_eq!(1, pd.len());
        assert_eq!("Eloquent JavaScript", pd[0].title);

        Ok(())
    }

    #[test]
    fn parse_malformed() -> anyhow::Result<()> {
        let google_books = GoogleBooks::new(&Config::default())?;

        assert_eq!(true, google_books.parse("<html>").is_err());

        Ok(())
    }
}

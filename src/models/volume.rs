use std::convert::TryFrom;

use serde::Deserialize;

use super::{Book, FALLBACK_THUMBNAIL, UNKNOWN_AUTHOR};

/// Response of `GET https://www.googleapis.com/books/v1/volumes?q=...`
///
/// ```json
/// {
///   "totalItems": 1,
///   "items": [
///     {
///       "id": "zyTCAlFPjgYC",
///       "volumeInfo": {
///         "title": "The Google Story",
///         "authors": ["David A. Vise", "Mark Malseed"],
///         "publishedDate": "2005-11-15",
///         "pageCount": 207,
///         "imageLinks": { "smallThumbnail": "...", "thumbnail": "..." },
///         "industryIdentifiers": [{ "type": "ISBN_10", "identifier": "055380457X" }]
///       }
///     }
///   ]
/// }
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: u64,
    /// Absent when nothing matched.
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    /// Kept signed so a bogus count drops the field, not the response.
    pub page_count: Option<i64>,
    pub image_links: Option<ImageLinks>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub publisher: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl VolumesResponse {
    /// Untitled or id-less volumes are dropped.
    pub fn into_books(self) -> Vec<Book> {
        self.items
            .into_iter()
            .filter_map(Volume::into_book)
            .collect()
    }
}

impl Volume {
    pub fn into_book(self) -> Option<Book> {
        let id = non_empty(self.id)?;
        let info = self.volume_info;
        let title = non_empty(info.title)?;

        let authors = info
            .authors
            .filter(|authors| !authors.is_empty())
            .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]);

        // "2005-11-15" -> "2005"
        let published_year = info
            .published_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .unwrap_or("")
            .to_string();

        let thumbnail = info
            .image_links
            .and_then(|ImageLinks { thumbnail, small_thumbnail }| {
                non_empty(thumbnail).or_else(|| non_empty(small_thumbnail))
            })
            .unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());

        let isbn = info
            .industry_identifiers
            .and_then(|ids| ids.into_iter().next())
            .map(|id| id.identifier)
            .filter(|id| !id.is_empty());

        Some(Book {
            id,
            title,
            authors,
            published_year,
            description: info.description.unwrap_or_default(),
            thumbnail,
            isbn,
            page_count: info
                .page_count
                .filter(|count| *count >= 1)
                .and_then(|count| u32::try_from(count).ok()),
            publisher: non_empty(info.publisher),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::VolumesResponse;
    use crate::models::FALLBACK_THUMBNAIL;

    #[test]
    fn into_books_full_record() -> anyhow::Result<()> {
        let rd = r#"{
            "totalItems": 1,
            "items": [{
                "id": "zyTCAlFPjgYC",
                "volumeInfo": {
                    "title": "The Google Story",
                    "authors": ["David A. Vise", "Mark Malseed"],
                    "publisher": "Random House Digital, Inc.",
                    "publishedDate": "2005-11-15",
                    "description": "Here is the story behind one of the most remarkable Internet successes.",
                    "industryIdentifiers": [
                        { "type": "ISBN_10", "identifier": "055380457X" },
                        { "type": "ISBN_13", "identifier": "9780553804577" }
                    ],
                    "pageCount": 207,
                    "imageLinks": {
                        "smallThumbnail": "http://books.google.com/small.jpg",
                        "thumbnail": "http://books.google.com/thumb.jpg"
                    }
                }
            }]
        }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();

        assert_eq!(1, books.len());
        let book = &books[0];
        assert_eq!("zyTCAlFPjgYC", book.id);
        assert_eq!("The Google Story", book.title);
        assert_eq!(vec!["David A. Vise", "Mark Malseed"], book.authors);
        assert_eq!("2005", book.published_year);
        assert_eq!("http://books.google.com/thumb.jpg", book.thumbnail);
        assert_eq!(Some(String::from("055380457X")), book.isbn);
        assert_eq!(Some(207), book.page_count);
        assert_eq!(Some(String::from("Random House Digital, Inc.")), book.publisher);

        Ok(())
    }

    #[test]
    fn into_books_drops_untitled() -> anyhow::Result<()> {
        let rd = r#"{
            "totalItems": 3,
            "items": [
                { "id": "a", "volumeInfo": { "authors": ["Nobody"] } },
                { "id": "b", "volumeInfo": { "title": "" } },
                { "id": "c", "volumeInfo": { "title": "Kept" } }
            ]
        }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();

        let ids = books.iter().map(|book| book.id.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["c"], ids);

        Ok(())
    }

    #[test]
    fn into_books_defaults() -> anyhow::Result<()> {
        let rd = r#"{
            "items": [{
                "id": "c",
                "volumeInfo": {
                    "title": "Kept",
                    "imageLinks": { "smallThumbnail": "http://small.jpg" }
                }
            }]
        }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();
        let book = &books[0];

        assert_eq!(vec!["Unknown Author"], book.authors);
        assert_eq!("", book.published_year);
        assert_eq!("", book.description);
        assert_eq!("http://small.jpg", book.thumbnail);
        assert_eq!(None, book.isbn);
        assert_eq!(None, book.page_count);
        assert_eq!(None, book.publisher);

        Ok(())
    }

    #[test]
    fn into_books_without_images_uses_fallback() -> anyhow::Result<()> {
        let rd = r#"{ "items": [{ "id": "c", "volumeInfo": { "title": "Kept" } }] }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();

        assert_eq!(FALLBACK_THUMBNAIL, books[0].thumbnail);

        Ok(())
    }

    #[test]
    fn one_bad_item_keeps_the_rest() -> anyhow::Result<()> {
        let rd = r#"{
            "totalItems": 4,
            "items": [
                { "id": "ok", "volumeInfo": { "title": "Good", "pageCount": 320 } },
                { "volumeInfo": { "title": "No id" } },
                { "id": "neg", "volumeInfo": { "title": "Negative pages", "pageCount": -1 } },
                { "id": "huge", "volumeInfo": { "title": "Huge", "pageCount": 99999999999 } }
            ]
        }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();

        let ids = books.iter().map(|book| book.id.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["ok", "neg", "huge"], ids);
        assert_eq!(Some(320), books[0].page_count);
        assert_eq!(None, books[1].page_count);
        assert_eq!(None, books[2].page_count);

        Ok(())
    }

    #[test]
    fn no_items() -> anyhow::Result<()> {
        let rd = r#"{ "kind": "books#volumes", "totalItems": 0 }"#;

        let books = serde_json::from_str::<VolumesResponse>(rd)?.into_books();

        assert!(books.is_empty());

        Ok(())
    }
}

mod book;
mod volume;

pub use book::{authors_display, Book, BookPatch, NewBook, FALLBACK_THUMBNAIL, UNKNOWN_AUTHOR};
pub use volume::{ImageLinks, IndustryIdentifier, Volume, VolumeInfo, VolumesResponse};
